use std::fmt;

use chrono::{Days, NaiveDate, NaiveDateTime};
use sepal_client::{QueryParams, UrlTemplate, endpoints};
use sepal_types::{Job, PagedEntity, Sort, Trade, Transaction};

/// Filter value the API reads as "no filter"
pub const ALL: &str = "ALL";

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter record of one paged table.
///
/// The filters together with the page index and page size form the query
/// tuple; two tuples are equal exactly when their parameters are.
pub trait PagedQuery: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    type Item: PagedEntity;

    /// Label used in logs and metrics
    const ENTITY: &'static str;
    const TEMPLATE: UrlTemplate;

    /// Adds the filter placeholders (everything except `page`/`pageSize`)
    fn write_params(&self, params: &mut QueryParams);

    /// A disabled query is never sent, the controller stays idle
    fn is_enabled(&self) -> bool {
        true
    }
}

pub fn build_query_params<Q: PagedQuery>(filters: &Q, page: u32, page_size: u32) -> QueryParams {
    let mut params = QueryParams::new();
    filters.write_params(&mut params);
    params.insert("page", page);
    params.insert("pageSize", page_size);
    params
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradesQuery {
    /// `None` until an account is selected
    pub account_number: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub trade_type: String,
    pub symbol: String,
    pub sort: Sort,
}

impl TradesQuery {
    pub fn new(account_number: Option<i64>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            account_number,
            start,
            end,
            trade_type: ALL.to_string(),
            symbol: ALL.to_string(),
            sort: Sort::default(),
        }
    }
}

impl PagedQuery for TradesQuery {
    type Item = Trade;

    const ENTITY: &'static str = "trades";
    const TEMPLATE: UrlTemplate = endpoints::trade::GET_PAGED;

    fn write_params(&self, params: &mut QueryParams) {
        if let Some(account_number) = self.account_number {
            params.insert("accountNumber", account_number);
        }
        params.insert("start", self.start.format(DATE_TIME_FORMAT));
        params.insert("end", self.end.format(DATE_TIME_FORMAT));
        params.insert("tradeType", &self.trade_type);
        params.insert("symbol", &self.symbol);
        params.insert("sort", self.sort);
    }

    fn is_enabled(&self) -> bool {
        self.account_number.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub account_number: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub transaction_type: String,
    pub transaction_status: String,
    pub sort: Sort,
}

impl TransactionsQuery {
    pub fn new(account_number: Option<i64>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            account_number,
            start,
            end,
            transaction_type: ALL.to_string(),
            transaction_status: ALL.to_string(),
            sort: Sort::default(),
        }
    }
}

impl PagedQuery for TransactionsQuery {
    type Item = Transaction;

    const ENTITY: &'static str = "transactions";
    const TEMPLATE: UrlTemplate = endpoints::transaction::GET_PAGED;

    fn write_params(&self, params: &mut QueryParams) {
        if let Some(account_number) = self.account_number {
            params.insert("accountNumber", account_number);
        }
        params.insert("start", self.start.format(DATE_TIME_FORMAT));
        params.insert("end", self.end.format(DATE_TIME_FORMAT));
        params.insert("transactionType", &self.transaction_type);
        params.insert("transactionStatus", &self.transaction_status);
        params.insert("sort", self.sort);
    }

    fn is_enabled(&self) -> bool {
        self.account_number.is_some()
    }
}

/// Jobs are filtered by calendar day; `end` is inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub job_type: String,
    pub job_status: String,
    pub sort: Sort,
}

impl JobsQuery {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            job_type: ALL.to_string(),
            job_status: ALL.to_string(),
            sort: Sort::default(),
        }
    }
}

impl PagedQuery for JobsQuery {
    type Item = Job;

    const ENTITY: &'static str = "jobs";
    const TEMPLATE: UrlTemplate = endpoints::job::GET_PAGED;

    fn write_params(&self, params: &mut QueryParams) {
        // the API treats `end` as exclusive
        let end = self.end.checked_add_days(Days::new(1)).unwrap_or(self.end);

        params.insert("start", self.start.format(DATE_FORMAT));
        params.insert("end", end.format(DATE_FORMAT));
        params.insert("jobType", &self.job_type);
        params.insert("jobStatus", &self.job_status);
        params.insert("sort", self.sort);
    }
}
