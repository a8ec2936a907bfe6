use serde::Serialize;

use sepal_chart::{
    EquityChart, format_negative_points, format_number_for_display, format_time_elapsed,
    value_bounds,
};
use sepal_query::PageWindow;
use sepal_types::{Job, Page, PagedEntity, PortfolioRecord, Trade, Transaction};

const DATE_TIME: &str = "%Y-%m-%d %H:%M";

/// Text table layout of a paged entity
pub trait Render: PagedEntity + Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl Render for Trade {
    const HEADERS: &'static [&'static str] =
        &["trade", "product", "type", "opened", "lots", "points", "net profit"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.trade_id.clone(),
            self.product.clone(),
            self.trade_type.clone(),
            self.trade_open_time
                .map(|t| t.format(DATE_TIME).to_string())
                .unwrap_or_default(),
            format_number_for_display(self.lot_size),
            format_negative_points(self.points),
            format_negative_points(self.net_profit),
        ]
    }
}

impl Render for Transaction {
    const HEADERS: &'static [&'static str] = &["date", "type", "name", "status", "amount", "account"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_date
                .map(|t| t.format(DATE_TIME).to_string())
                .unwrap_or_default(),
            self.transaction_type.label.clone(),
            self.name.clone(),
            self.transaction_status.label.clone(),
            format_number_for_display(self.amount),
            self.account_name.clone(),
        ]
    }
}

impl Render for Job {
    const HEADERS: &'static [&'static str] = &["job", "name", "type", "status", "started", "took"];

    fn cells(&self) -> Vec<String> {
        let took = match (self.execution_time, self.completion_time) {
            (Some(start), Some(end)) => {
                format_time_elapsed(end.signed_duration_since(start).num_seconds().max(0) as u64)
            }
            (Some(_), None) => "running".to_string(),
            _ => String::new(),
        };

        vec![
            self.job_id.clone(),
            self.name.clone(),
            self.job_type.label.clone(),
            self.status.label.clone(),
            self.execution_time
                .map(|t| t.format(DATE_TIME).to_string())
                .unwrap_or_default(),
            took,
        ]
    }
}

pub fn print_page<T: Render>(page: &Page<T>, window: Option<&PageWindow>) {
    if page.is_empty() {
        println!("No {} found.", T::ITEMS_KEY);
        return;
    }

    let rows: Vec<Vec<String>> = page.items.iter().map(Render::cells).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = T::HEADERS.iter().map(ToString::to_string).collect();
    print_row(&headers, &widths);
    for row in &rows {
        print_row(row, &widths);
    }

    println!(
        "\nPage {} of {} ({} {})",
        page.page + 1,
        page.total_pages.max(1),
        page.total_elements,
        T::ITEMS_KEY
    );
    if let Some(window) = window {
        println!("{window}");
    }
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    println!("{}", line.join("  ").trim_end());
}

pub fn print_growth(record: &PortfolioRecord, chart: &EquityChart) {
    println!("Net worth: {}", format_number_for_display(record.net_worth));

    if chart.is_empty() {
        println!("No equity history.");
        return;
    }

    let portfolio: Vec<f64> = chart.rows.iter().map(|row| row.portfolio).collect();
    if let Some((low, high)) = value_bounds(&portfolio) {
        println!(
            "Range: {} to {}  (gradient stop {})",
            format_negative_points(low),
            format_negative_points(high),
            chart.gradient_stop
        );
    }

    let mut headers = vec!["date".to_string(), "portfolio".to_string()];
    if chart.multiple_series {
        headers.extend(chart.keys.iter().cloned());
    }
    let rows: Vec<Vec<String>> = chart
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.date.to_string(),
                format_negative_points(row.portfolio),
            ];
            if chart.multiple_series {
                cells.extend(
                    row.accounts
                        .iter()
                        .map(|(_, total)| format_negative_points(*total)),
                );
            }
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_row(&headers, &widths);
    for row in &rows {
        print_row(row, &widths);
    }
}
