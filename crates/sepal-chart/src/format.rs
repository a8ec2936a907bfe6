/// Two decimals with thousands separators, dropping a trailing `.00`.
///
/// Zero and non-finite values render as `0`.
pub fn format_number_for_display(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{value:.2}");
    let (sign, unsigned) = fixed
        .strip_prefix('-')
        .map_or(("", fixed.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    if int_part.chars().all(|c| c == '0') && frac_part == "00" {
        return "0".to_string();
    }

    let grouped = group_thousands(int_part);
    if frac_part == "00" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Negative values are shown in brackets instead of with a minus sign
pub fn format_negative_points(value: f64) -> String {
    if value < 0.0 {
        format!("({})", format_number_for_display(value.abs()))
    } else {
        format_number_for_display(value)
    }
}

pub fn format_time_elapsed(seconds: u64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!(
            "{}h {}m {}s",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_for_display() {
        assert_eq!(format_number_for_display(0.0), "0");
        assert_eq!(format_number_for_display(f64::NAN), "0");
        assert_eq!(format_number_for_display(12.0), "12");
        assert_eq!(format_number_for_display(1234.5), "1,234.50");
        assert_eq!(format_number_for_display(1_000_000.0), "1,000,000");
        assert_eq!(format_number_for_display(-3.456), "-3.46");
        assert_eq!(format_number_for_display(999.999), "1,000");
        assert_eq!(format_number_for_display(0.001), "0");
    }

    #[test]
    fn test_format_negative_points() {
        assert_eq!(format_negative_points(-3.5), "(3.50)");
        assert_eq!(format_negative_points(-1250.0), "(1,250)");
        assert_eq!(format_negative_points(42.25), "42.25");
    }

    #[test]
    fn test_format_time_elapsed() {
        assert_eq!(format_time_elapsed(45), "45s");
        assert_eq!(format_time_elapsed(125), "2m 5s");
        assert_eq!(format_time_elapsed(3661), "1h 1m 1s");
    }
}
