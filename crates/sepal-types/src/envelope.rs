use serde::{Deserialize, Serialize};

/// Standard response wrapper returned by every journal API endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Returns the payload when the API flagged the call as successful,
    /// otherwise the message it reported.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.unwrap_or_else(|| "no message provided".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsuccessful_envelope_surfaces_message() {
        let response: ApiResponse<serde_json::Value> = serde_json::from_value(json!({
            "success": false,
            "message": "account not found",
            "data": null
        }))
        .unwrap();

        assert_eq!(response.into_result().unwrap_err(), "account not found");
    }

    #[test]
    fn test_missing_success_flag_is_a_failure() {
        let response: ApiResponse<u32> = serde_json::from_value(json!({ "data": 3 })).unwrap();
        assert_eq!(response.into_result().unwrap_err(), "no message provided");
    }
}
