mod cli;
mod render;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use url::Url;

use sepal_chart::EquityChart;
use sepal_client::{ApiTransport, ClientConfig, JournalApi, JournalClient};
use sepal_metrics::MetricsRegistry;
use sepal_query::{
    JobsQuery, PagedQuery, PagedQueryController, QueryState, Selection, SelectionStore,
    TradesQuery, TransactionsQuery,
};

use crate::cli::{Command, DateRange, Paging, SepalCli};
use crate::render::Render;

fn init_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logger();

    let cli = SepalCli::parse();

    let api_domain = Url::parse(&cli.api_domain).context("Invalid API domain")?;
    let config = ClientConfig {
        api_domain: api_domain.as_str().to_string(),
        api_version: cli.api_version.clone(),
        api_token: cli.api_token.clone(),
        request_timeout: (cli.request_timeout_secs > 0)
            .then(|| Duration::from_secs(cli.request_timeout_secs)),
    };
    let client = JournalClient::new(&config).context("Failed to build the journal client")?;
    tracing::info!(base_url = client.base_url(), "Journal client ready");
    let transport: Arc<dyn ApiTransport> = Arc::new(client);

    if cli.show_build_version {
        match transport.get_health_check().await {
            Ok(health) => tracing::info!(
                version = %health.version,
                api_version = %health.api_version,
                domain = %health.domain,
                "Journal API build"
            ),
            Err(e) => tracing::warn!(error = %e, "Could not fetch the API build version"),
        }
    }

    let metrics = MetricsRegistry::new();
    let selection = seed_selection(cli.portfolio_number, cli.account_number);

    match cli.command {
        Command::Trades {
            trade_type,
            symbol,
            range,
            paging,
        } => {
            let (start, end) = datetime_range(&range)?;
            let account_number = resolve_account(transport.as_ref(), &selection).await?;
            let mut query = TradesQuery::new(Some(account_number), start, end);
            query.trade_type = trade_type;
            query.symbol = symbol;
            query.sort = paging.sort;
            run_paged(transport, &metrics, query, &paging, cli.json).await
        }
        Command::Transactions {
            transaction_type,
            transaction_status,
            range,
            paging,
        } => {
            let (start, end) = datetime_range(&range)?;
            let account_number = resolve_account(transport.as_ref(), &selection).await?;
            let mut query = TransactionsQuery::new(Some(account_number), start, end);
            query.transaction_type = transaction_type;
            query.transaction_status = transaction_status;
            query.sort = paging.sort;
            run_paged(transport, &metrics, query, &paging, cli.json).await
        }
        Command::Jobs {
            job_type,
            job_status,
            range,
            paging,
        } => {
            check_range(&range)?;
            let mut query = JobsQuery::new(range.start, range.end);
            query.job_type = job_type;
            query.job_status = job_status;
            query.sort = paging.sort;
            run_paged(transport, &metrics, query, &paging, cli.json).await
        }
        Command::Growth => {
            let portfolio_number = selection
                .portfolio_number()
                .context("--portfolio-number is required for growth")?;
            let record = transport
                .get_portfolio_record(&portfolio_number.to_string())
                .await
                .context("Failed to fetch the portfolio record")?;
            let chart = EquityChart::from_points(&record.equity);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                render::print_growth(&record, &chart);
            }
            Ok(())
        }
    }
}

fn seed_selection(portfolio_number: Option<i64>, account_number: Option<i64>) -> SelectionStore {
    let selection = SelectionStore::default();
    if let Some(portfolio_number) = portfolio_number {
        selection.select_portfolio(portfolio_number);
    }
    if let Some(account_number) = account_number {
        selection.select_account(account_number);
    }
    selection
}

/// The selected account, or the default account of the selected portfolio
async fn resolve_account(transport: &dyn ApiTransport, selection: &SelectionStore) -> Result<i64> {
    match selection.get() {
        Selection {
            account_number: Some(account_number),
            ..
        } => Ok(account_number),
        Selection {
            portfolio_number: Some(portfolio_number),
            ..
        } => {
            let portfolio = transport
                .get_portfolio(portfolio_number)
                .await
                .context("Failed to fetch the portfolio")?;
            let account = portfolio
                .default_account()
                .with_context(|| format!("Portfolio {portfolio_number} has no accounts"))?;
            tracing::info!(
                portfolio_number,
                account_number = account.account_number,
                account = %account.name,
                "Using the default account of the portfolio"
            );
            selection.select_account(account.account_number);
            Ok(account.account_number)
        }
        Selection { .. } => bail!("Either --account-number or --portfolio-number is required"),
    }
}

fn check_range(range: &DateRange) -> Result<()> {
    if range.end < range.start {
        bail!("--end ({}) is before --start ({})", range.end, range.start);
    }
    Ok(())
}

/// Whole days from the start of `start` to the end of `end`
fn datetime_range(range: &DateRange) -> Result<(NaiveDateTime, NaiveDateTime)> {
    check_range(range)?;
    let start = range.start.and_hms_opt(0, 0, 0).context("Invalid start date")?;
    let end = range.end.and_hms_opt(23, 59, 59).context("Invalid end date")?;
    Ok((start, end))
}

async fn run_paged<Q>(
    transport: Arc<dyn ApiTransport>,
    metrics: &MetricsRegistry,
    query: Q,
    paging: &Paging,
    json: bool,
) -> Result<()>
where
    Q: PagedQuery,
    Q::Item: Render,
{
    let controller = PagedQueryController::new(transport, query, paging.page_size)
        .with_metrics(Arc::clone(&metrics.queries));

    controller.set_page(paging.page);
    let state = controller.settled().await;

    if controller.current_page() != paging.page {
        tracing::info!(
            requested = paging.page,
            shown = controller.current_page(),
            "Requested page out of range, showing the last page"
        );
    }

    match state {
        QueryState::Ready { page } => {
            let window = controller.page_window();
            if json {
                let output = serde_json::json!({ "page": page.as_ref(), "window": window });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                render::print_page(&page, window.as_ref());
            }
            Ok(())
        }
        QueryState::Errored { error } => Err(error).context(format!("Failed to fetch {}", Q::ENTITY)),
        QueryState::Idle => bail!("Query for {} is disabled", Q::ENTITY),
        QueryState::Fetching { .. } => bail!("Fetch for {} did not settle", Q::ENTITY),
    }
}
