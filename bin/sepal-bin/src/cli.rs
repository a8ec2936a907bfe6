use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use sepal_types::Sort;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sepal trading journal client", long_about = None)]
pub struct SepalCli {
    /// Journal API domain, e.g. https://journal.example.com
    #[arg(long, env = "SEPAL_API_DOMAIN")]
    pub api_domain: String,

    /// API version prefix appended to the domain
    #[arg(long, env = "SEPAL_API_VERSION", default_value = "/api/v1")]
    pub api_version: String,

    /// Token sent in the `fp-api_token` header
    #[arg(long, env = "SEPAL_API_TOKEN")]
    pub api_token: Option<String>,

    /// Request timeout in seconds, 0 disables it
    #[arg(long, env = "SEPAL_REQUEST_TIMEOUT_SECS", default_value = "0")]
    pub request_timeout_secs: u64,

    /// Log the API build version before running the command
    #[arg(long, env = "ENABLE_BUILD_VERSION")]
    pub show_build_version: bool,

    /// Portfolio to look at. Trades and transactions use its default
    /// account when no account is given
    #[arg(long, env = "SEPAL_PORTFOLIO_NUMBER", global = true)]
    pub portfolio_number: Option<i64>,

    #[arg(long, env = "SEPAL_ACCOUNT_NUMBER", global = true)]
    pub account_number: Option<i64>,

    /// Print raw JSON instead of a text table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Paged trades of an account
    Trades {
        #[arg(long, default_value = "ALL")]
        trade_type: String,

        #[arg(long, default_value = "ALL")]
        symbol: String,

        #[command(flatten)]
        range: DateRange,

        #[command(flatten)]
        paging: Paging,
    },
    /// Paged transactions of an account
    Transactions {
        #[arg(long, default_value = "ALL")]
        transaction_type: String,

        #[arg(long, default_value = "ALL")]
        transaction_status: String,

        #[command(flatten)]
        range: DateRange,

        #[command(flatten)]
        paging: Paging,
    },
    /// Paged background jobs
    Jobs {
        #[arg(long, default_value = "ALL")]
        job_type: String,

        #[arg(long, default_value = "ALL")]
        job_status: String,

        #[command(flatten)]
        range: DateRange,

        #[command(flatten)]
        paging: Paging,
    },
    /// Cumulative portfolio growth series
    Growth,
}

#[derive(Args, Debug)]
pub struct DateRange {
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,
}

#[derive(Args, Debug)]
pub struct Paging {
    /// Zero-based page index
    #[arg(long, default_value = "0")]
    pub page: u32,

    #[arg(long, default_value = "10")]
    pub page_size: u32,

    #[arg(long, default_value = "asc")]
    pub sort: Sort,
}
