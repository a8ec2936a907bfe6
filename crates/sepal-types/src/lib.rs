pub mod account;
pub mod common;
pub mod envelope;
pub mod equity;
pub mod job;
pub mod page;
pub mod sort;
pub mod trade;
pub mod transaction;

pub use account::{Account, AccountDetails, Portfolio};
pub use common::*;
pub use envelope::ApiResponse;
pub use equity::{AccountValue, EquityPoint, decode_equity_points};
pub use job::Job;
pub use page::{Page, PagedEntity};
pub use sort::Sort;
pub use trade::Trade;
pub use transaction::Transaction;
