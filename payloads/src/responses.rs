use serde::{Deserialize, Serialize};

/// Successful status-check response: where the browser should go next
/// (admin portal, dashboard, or onboarding, decided by the backend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStatusOutcome {
    pub redirect_url: String,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
