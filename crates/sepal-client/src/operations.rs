use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use sepal_types::{
    Account, AccountDetails, EnumDisplay, HealthCheck, Job, Portfolio, PortfolioRecord, Trade,
    Transaction,
};

use crate::{
    endpoints,
    error::ClientError,
    template::{QueryParams, UrlTemplate},
    traits::ApiTransport,
};

/// Typed calls on top of any [`ApiTransport`]
#[async_trait::async_trait]
pub trait JournalApi: ApiTransport {
    async fn get_portfolio(&self, portfolio_number: i64) -> Result<Portfolio, ClientError> {
        let params = QueryParams::new().with("portfolioNumber", portfolio_number);
        get_typed(self, endpoints::portfolio::GET, &params).await
    }

    async fn create_portfolio(&self, portfolio: &Portfolio) -> Result<Portfolio, ClientError> {
        let body = serde_json::to_value(portfolio)?;
        send_typed(
            self,
            Method::POST,
            endpoints::portfolio::CREATE,
            &QueryParams::new(),
            Some(body),
        )
        .await
    }

    async fn update_portfolio(
        &self,
        portfolio_number: i64,
        portfolio: &Portfolio,
    ) -> Result<Portfolio, ClientError> {
        let params = QueryParams::new().with("portfolioNumber", portfolio_number);
        let body = serde_json::to_value(portfolio)?;
        send_typed(self, Method::PUT, endpoints::portfolio::UPDATE, &params, Some(body)).await
    }

    async fn delete_portfolio(&self, portfolio_number: i64) -> Result<bool, ClientError> {
        let params = QueryParams::new().with("portfolioNumber", portfolio_number);
        send_typed(self, Method::DELETE, endpoints::portfolio::DELETE, &params, None).await
    }

    async fn get_account_details(&self, account_number: i64) -> Result<AccountDetails, ClientError> {
        let params = QueryParams::new().with("accountNumber", account_number);
        get_typed(self, endpoints::account::GET_DETAILS, &params).await
    }

    async fn create_account(
        &self,
        portfolio_number: i64,
        account: &Account,
    ) -> Result<Account, ClientError> {
        let params = QueryParams::new().with("portfolioNumber", portfolio_number);
        let body = serde_json::to_value(account)?;
        send_typed(self, Method::POST, endpoints::account::CREATE, &params, Some(body)).await
    }

    async fn update_account(
        &self,
        portfolio_number: i64,
        account_number: i64,
        account: &Account,
    ) -> Result<Account, ClientError> {
        let params = account_params(portfolio_number, account_number);
        let body = serde_json::to_value(account)?;
        send_typed(self, Method::PUT, endpoints::account::UPDATE, &params, Some(body)).await
    }

    async fn delete_account(
        &self,
        portfolio_number: i64,
        account_number: i64,
    ) -> Result<bool, ClientError> {
        let params = account_params(portfolio_number, account_number);
        send_typed(self, Method::DELETE, endpoints::account::DELETE, &params, None).await
    }

    async fn get_currencies(&self) -> Result<Vec<EnumDisplay>, ClientError> {
        get_typed(self, endpoints::account::GET_CURRENCIES, &QueryParams::new()).await
    }

    async fn get_account_types(&self) -> Result<Vec<EnumDisplay>, ClientError> {
        get_typed(self, endpoints::account::GET_ACCOUNT_TYPES, &QueryParams::new()).await
    }

    async fn get_brokers(&self) -> Result<Vec<EnumDisplay>, ClientError> {
        get_typed(self, endpoints::account::GET_BROKERS, &QueryParams::new()).await
    }

    async fn get_trade_platforms(&self) -> Result<Vec<EnumDisplay>, ClientError> {
        get_typed(self, endpoints::account::GET_TRADE_PLATFORMS, &QueryParams::new()).await
    }

    async fn get_portfolio_record(
        &self,
        portfolio_number: &str,
    ) -> Result<PortfolioRecord, ClientError> {
        let params = QueryParams::new().with("portfolioNumber", portfolio_number);
        get_typed(self, endpoints::portfolio_record::GET, &params).await
    }

    async fn get_traded_symbols(&self, account_number: i64) -> Result<Vec<String>, ClientError> {
        let params = QueryParams::new().with("accountNumber", account_number);
        get_typed(self, endpoints::symbol::GET_TRADED_SYMBOLS, &params).await
    }

    async fn get_job_types(&self) -> Result<Vec<EnumDisplay>, ClientError> {
        get_typed(self, endpoints::job::GET_JOB_TYPES, &QueryParams::new()).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Job, ClientError> {
        let params = QueryParams::new().with("jobId", job_id);
        get_typed(self, endpoints::job::GET_BY_ID, &params).await
    }

    async fn get_health_check(&self) -> Result<HealthCheck, ClientError> {
        get_typed(self, endpoints::system::HEALTH_CHECK, &QueryParams::new()).await
    }

    async fn get_trade(&self, account_number: i64, trade_id: &str) -> Result<Trade, ClientError> {
        let params = trade_params(account_number, trade_id);
        get_typed(self, endpoints::trade::GET_FOR_TRADE_ID, &params).await
    }

    async fn create_trade(&self, account_number: i64, trade: &Trade) -> Result<Trade, ClientError> {
        let params = QueryParams::new().with("accountNumber", account_number);
        let body = serde_json::to_value(trade)?;
        send_typed(self, Method::POST, endpoints::trade::CREATE, &params, Some(body)).await
    }

    async fn update_trade(
        &self,
        account_number: i64,
        trade_id: &str,
        trade: &Trade,
    ) -> Result<Trade, ClientError> {
        let params = trade_params(account_number, trade_id);
        let body = serde_json::to_value(trade)?;
        send_typed(self, Method::PUT, endpoints::trade::UPDATE, &params, Some(body)).await
    }

    async fn delete_trade(&self, account_number: i64, trade_id: &str) -> Result<bool, ClientError> {
        let params = trade_params(account_number, trade_id);
        send_typed(self, Method::DELETE, endpoints::trade::DELETE, &params, None).await
    }

    async fn create_transaction(
        &self,
        account_number: i64,
        transaction: &Transaction,
    ) -> Result<Transaction, ClientError> {
        let params = QueryParams::new().with("accountNumber", account_number);
        let body = serde_json::to_value(transaction)?;
        send_typed(
            self,
            Method::POST,
            endpoints::transaction::CREATE,
            &params,
            Some(body),
        )
        .await
    }

    async fn update_transaction(
        &self,
        account_number: i64,
        transaction_number: i64,
        transaction: &Transaction,
    ) -> Result<Transaction, ClientError> {
        let params = transaction_params(account_number, transaction_number);
        let body = serde_json::to_value(transaction)?;
        send_typed(
            self,
            Method::PUT,
            endpoints::transaction::UPDATE,
            &params,
            Some(body),
        )
        .await
    }

    async fn delete_transaction(
        &self,
        account_number: i64,
        transaction_number: i64,
    ) -> Result<bool, ClientError> {
        let params = transaction_params(account_number, transaction_number);
        send_typed(self, Method::DELETE, endpoints::transaction::DELETE, &params, None).await
    }
}

impl<T: ApiTransport + ?Sized> JournalApi for T {}

fn account_params(portfolio_number: i64, account_number: i64) -> QueryParams {
    QueryParams::new()
        .with("portfolioNumber", portfolio_number)
        .with("accountNumber", account_number)
}

fn trade_params(account_number: i64, trade_id: &str) -> QueryParams {
    QueryParams::new()
        .with("accountNumber", account_number)
        .with("tradeId", trade_id)
}

fn transaction_params(account_number: i64, transaction_number: i64) -> QueryParams {
    QueryParams::new()
        .with("accountNumber", account_number)
        .with("transactionNumber", transaction_number)
}

async fn get_typed<C, R>(
    transport: &C,
    template: UrlTemplate,
    params: &QueryParams,
) -> Result<R, ClientError>
where
    C: ApiTransport + ?Sized,
    R: DeserializeOwned,
{
    let data = transport.get_data(&template.populate(params)).await?;
    Ok(serde_json::from_value(data)?)
}

async fn send_typed<C, R>(
    transport: &C,
    method: Method,
    template: UrlTemplate,
    params: &QueryParams,
    body: Option<Value>,
) -> Result<R, ClientError>
where
    C: ApiTransport + ?Sized,
    R: DeserializeOwned,
{
    let data = transport
        .send_data(method, &template.populate(params), body)
        .await?;
    Ok(serde_json::from_value(data)?)
}
