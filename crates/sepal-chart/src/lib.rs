pub mod equity;
pub mod format;

pub use equity::{
    CumulativeSeriesRow, EquityChart, GradientStop, accumulate, discover_account_keys,
    gradient_stop, has_multiple_series, value_bounds,
};
pub use format::{format_negative_points, format_number_for_display, format_time_elapsed};
