use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{
    EnumDisplay, deserialize_lenient_datetime, deserialize_lenient_f64, deserialize_lenient_i64,
};
use crate::page::PagedEntity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub transaction_number: i64,
    pub transaction_type: EnumDisplay,
    #[serde(deserialize_with = "deserialize_lenient_datetime")]
    pub transaction_date: Option<NaiveDateTime>,
    pub name: String,
    pub transaction_status: EnumDisplay,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub amount: f64,
    #[serde(deserialize_with = "deserialize_lenient_i64")]
    pub account_number: i64,
    pub account_name: String,
}

impl PagedEntity for Transaction {
    const ITEMS_KEY: &'static str = "transactions";
    const TOTAL_KEY: &'static str = "totalTransactions";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Page;
    use serde_json::json;

    #[test]
    fn test_transactions_page_uses_entity_total() {
        let page = Page::<Transaction>::decode(json!({
            "currentPage": 2,
            "pageSize": 5,
            "totalPages": 4,
            "totalTransactions": 17,
            "transactions": [{
                "transactionNumber": "1042",
                "transactionType": { "code": "DEPOSIT", "label": "Deposit" },
                "transactionDate": "2024-03-04 10:15:00",
                "name": "Monthly top-up",
                "transactionStatus": { "code": "COMPLETED", "label": "Completed" },
                "amount": 250.5,
                "accountNumber": 1234,
                "accountName": "Swing"
            }]
        }));

        assert_eq!(page.page, 2);
        assert_eq!(page.total_elements, 17);
        let transaction = &page.items[0];
        assert_eq!(transaction.transaction_number, 1042);
        assert_eq!(transaction.transaction_type.code, "DEPOSIT");
        assert!(transaction.transaction_date.is_some());
        assert_eq!(transaction.amount, 250.5);
    }
}
