use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_sort_round_trips_as_query_value() {
        assert_eq!(Sort::Desc.to_string(), "desc");
        assert_eq!(Sort::Asc.as_ref(), "asc");
        assert_eq!(Sort::from_str("DESC").unwrap(), Sort::Desc);
        assert!(Sort::from_str("sideways").is_err());
    }
}
