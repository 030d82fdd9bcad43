use serde::{Deserialize, Serialize};

/// Body of the onboarding status check, sent after a successful sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckStatus {
    pub email: String,
}
