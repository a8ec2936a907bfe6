pub mod cache;
pub mod controller;
pub mod error;
pub mod query;
pub mod selection;
pub mod window;

pub use cache::RequestCache;
pub use controller::{PagedQueryController, QueryState};
pub use error::QueryError;
pub use query::{JobsQuery, PagedQuery, TradesQuery, TransactionsQuery, build_query_params};
pub use selection::{Selection, SelectionStore};
pub use window::{PageLink, PageWindow, compute_page_window};
