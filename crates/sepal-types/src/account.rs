use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{
    EnumDisplay, deserialize_lenient_datetime, deserialize_lenient_f64, deserialize_lenient_i64,
};

/// Trading account held inside a portfolio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub account_number: i64,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub portfolio_number: i64,
    pub name: String,
    pub active: bool,
    pub default_account: bool,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub balance: f64,
    pub currency: EnumDisplay,
    pub broker: EnumDisplay,
    pub account_type: EnumDisplay,
    pub trade_platform: EnumDisplay,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub account_open_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub account_close_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub last_traded: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub portfolio_number: i64,
    pub name: String,
    pub active: bool,
    pub default_portfolio: bool,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub created: Option<NaiveDateTime>,
    pub accounts: Vec<Account>,
}

impl Portfolio {
    pub fn account(&self, account_number: i64) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.account_number == account_number)
    }

    /// The account flagged as default, or the first one
    pub fn default_account(&self) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.default_account)
            .or_else(|| self.accounts.first())
    }
}

/// Account header of the account details screen. Statistics and equity are
/// served alongside but not modelled here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountDetails {
    pub account: Account,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub consistency: f64,
}
