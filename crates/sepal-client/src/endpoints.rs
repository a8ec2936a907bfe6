//! Endpoint templates of the journal API, relative to `<domain><version>`.

use crate::template::UrlTemplate;

pub mod account {
    use super::UrlTemplate;

    pub const CREATE: UrlTemplate =
        UrlTemplate::new("/account/create-account?portfolioNumber={portfolioNumber}");
    pub const UPDATE: UrlTemplate = UrlTemplate::new(
        "/account/update-account?portfolioNumber={portfolioNumber}&accountNumber={accountNumber}",
    );
    pub const DELETE: UrlTemplate = UrlTemplate::new(
        "/account/delete-account?portfolioNumber={portfolioNumber}&accountNumber={accountNumber}",
    );
    pub const GET_DETAILS: UrlTemplate =
        UrlTemplate::new("/account/get-details?accountNumber={accountNumber}");
    pub const GET_CURRENCIES: UrlTemplate = UrlTemplate::new("/account/currencies");
    pub const GET_ACCOUNT_TYPES: UrlTemplate = UrlTemplate::new("/account/account-types");
    pub const GET_BROKERS: UrlTemplate = UrlTemplate::new("/account/brokers");
    pub const GET_TRADE_PLATFORMS: UrlTemplate = UrlTemplate::new("/account/trade-platforms");
}

pub mod job {
    use super::UrlTemplate;

    pub const GET_BY_ID: UrlTemplate = UrlTemplate::new("/job/get-by-id?jobId={jobId}");
    pub const GET_PAGED: UrlTemplate = UrlTemplate::new(
        "/job/get-status-type-paged?start={start}&end={end}&jobStatus={jobStatus}&jobType={jobType}&page={page}&pageSize={pageSize}&sort={sort}",
    );
    pub const GET_JOB_TYPES: UrlTemplate = UrlTemplate::new("/job/get-job-types");
}

pub mod portfolio {
    use super::UrlTemplate;

    pub const GET: UrlTemplate = UrlTemplate::new("/portfolio/get?portfolioNumber={portfolioNumber}");
    pub const CREATE: UrlTemplate = UrlTemplate::new("/portfolio/create-portfolio");
    pub const UPDATE: UrlTemplate =
        UrlTemplate::new("/portfolio/update-portfolio?portfolioNumber={portfolioNumber}");
    pub const DELETE: UrlTemplate =
        UrlTemplate::new("/portfolio/delete-portfolio?portfolioNumber={portfolioNumber}");
}

pub mod portfolio_record {
    use super::UrlTemplate;

    pub const GET: UrlTemplate =
        UrlTemplate::new("/portfolio-record/get?portfolioNumber={portfolioNumber}");
}

pub mod symbol {
    use super::UrlTemplate;

    pub const GET_TRADED_SYMBOLS: UrlTemplate =
        UrlTemplate::new("/symbol/get-traded-symbols?accountNumber={accountNumber}");
}

pub mod system {
    use super::UrlTemplate;

    pub const HEALTH_CHECK: UrlTemplate = UrlTemplate::new("/system/healthcheck");
}

pub mod trade {
    use super::UrlTemplate;

    pub const GET_PAGED: UrlTemplate = UrlTemplate::new(
        "/trade/get-for-interval-paged?accountNumber={accountNumber}&start={start}&end={end}&page={page}&pageSize={pageSize}&tradeType={tradeType}&symbol={symbol}&sort={sort}",
    );
    pub const GET_FOR_TRADE_ID: UrlTemplate =
        UrlTemplate::new("/trade/get-for-trade-id?accountNumber={accountNumber}&tradeId={tradeId}");
    pub const CREATE: UrlTemplate =
        UrlTemplate::new("/trade/create-trade?accountNumber={accountNumber}");
    pub const UPDATE: UrlTemplate =
        UrlTemplate::new("/trade/update-trade?accountNumber={accountNumber}&tradeId={tradeId}");
    pub const DELETE: UrlTemplate =
        UrlTemplate::new("/trade/delete-trade?accountNumber={accountNumber}&tradeId={tradeId}");
}

pub mod transaction {
    use super::UrlTemplate;

    pub const GET_PAGED: UrlTemplate = UrlTemplate::new(
        "/transaction/get-for-interval-paged?accountNumber={accountNumber}&start={start}&end={end}&page={page}&pageSize={pageSize}&transactionType={transactionType}&transactionStatus={transactionStatus}&sort={sort}",
    );
    pub const CREATE: UrlTemplate =
        UrlTemplate::new("/transaction/create-transaction?accountNumber={accountNumber}");
    pub const UPDATE: UrlTemplate = UrlTemplate::new(
        "/transaction/update-transaction?accountNumber={accountNumber}&transactionNumber={transactionNumber}",
    );
    pub const DELETE: UrlTemplate = UrlTemplate::new(
        "/transaction/delete-transaction?accountNumber={accountNumber}&transactionNumber={transactionNumber}",
    );
}
