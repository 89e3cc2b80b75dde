use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Deserializes a field where an explicit `null` is `Some(None)`.
///
/// Pair with `#[serde(default)]` so that an absent field stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Plain acknowledgement for operations without a resource body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Page size of list endpoints when `limit` is not given
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Outcome of a bulk CSV import
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportResultDto {
    pub success: u32,
    pub failed: u32,
    /// One `Row N: reason` entry per failed row
    pub errors: Vec<String>,
}
