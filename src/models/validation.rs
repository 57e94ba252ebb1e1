use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /validate-domain`. A missing or `null` domain is invalid.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DomainRequest {
    #[serde(default)]
    pub domain: Option<String>,
}

/// Body of `POST /validate-email`. A missing or `null` email is invalid.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkEmailRequest {
    pub emails: Vec<String>,
}

/// Outcome of a single validation. `reason` is a stable code and is only
/// present for invalid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub input: Option<String>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationResponse {
    pub fn valid(input: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            is_valid: true,
            reason: None,
        }
    }

    pub fn invalid(input: Option<&str>, reason: &str) -> Self {
        Self {
            input: input.map(str::to_string),
            is_valid: false,
            reason: Some(reason.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkEmailValidationResult {
    pub email: String,
    pub validation: ValidationResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BulkEmailValidationResponse {
    pub results: Vec<BulkEmailValidationResult>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

/// Classification of a single top-level domain label.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TldResponse {
    pub label: String,
    pub is_valid: bool,
    pub categories: Vec<String>,
}

/// Copy of one TLD table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TldTableResponse {
    pub table: String,
    pub entries: Vec<String>,
}
