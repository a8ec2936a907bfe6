use std::sync::Arc;

use tokio::sync::watch;

/// Account and portfolio the user is currently looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub account_number: Option<i64>,
    pub portfolio_number: Option<i64>,
}

/// Shared handle on the current [`Selection`].
///
/// Clones observe the same value. Subscribers are only woken when a write
/// actually changes it.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    sender: Arc<watch::Sender<Selection>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(Selection::default())
    }
}

impl SelectionStore {
    pub fn new(initial: Selection) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn get(&self) -> Selection {
        *self.sender.borrow()
    }

    pub fn account_number(&self) -> Option<i64> {
        self.sender.borrow().account_number
    }

    pub fn portfolio_number(&self) -> Option<i64> {
        self.sender.borrow().portfolio_number
    }

    /// Returns whether the selection changed
    pub fn select_account(&self, account_number: i64) -> bool {
        self.update(|selection| selection.account_number = Some(account_number))
    }

    /// Switching portfolio drops the account selection, accounts belong to
    /// a single portfolio
    pub fn select_portfolio(&self, portfolio_number: i64) -> bool {
        self.update(|selection| {
            if selection.portfolio_number != Some(portfolio_number) {
                selection.portfolio_number = Some(portfolio_number);
                selection.account_number = None;
            }
        })
    }

    pub fn clear(&self) -> bool {
        self.update(|selection| *selection = Selection::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.sender.subscribe()
    }

    fn update(&self, change: impl FnOnce(&mut Selection)) -> bool {
        self.sender.send_if_modified(|selection| {
            let before = *selection;
            change(selection);
            let changed = before != *selection;
            if changed {
                tracing::debug!(
                    account_number = ?selection.account_number,
                    portfolio_number = ?selection.portfolio_number,
                    "Selection changed"
                );
            }
            changed
        })
    }
}
