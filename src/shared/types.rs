use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker carried by every response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rows in the collection, ignoring filters (list responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    /// Rows matching the filters, ignoring pagination (list responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message,
            total: None,
            results: None,
            data,
            errors: None,
        }
    }

    /// Success envelope for a page of items plus collection counts
    pub fn list(data: T, total: i64, results: i64) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            total: Some(total),
            results: Some(results),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            status: ResponseStatus::Error,
            message,
            total: None,
            results: None,
            data: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_is_flat() {
        let body = ApiResponse::list(vec![1, 2], 5, 2);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "success", "total": 5, "results": 2, "data": [1, 2]})
        );
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let body = ApiResponse::<()>::error(Some("name info is required".to_string()), None);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "error", "message": "name info is required"})
        );
    }
}
