use derive_more::Display;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, StoreClient};

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct ClientId(pub Uuid);

impl std::str::FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct SiteBuildId(pub Uuid);

/// A tenant of the website-generation service.
///
/// Owned by the backend; the front end only ever holds a read-only,
/// request-scoped copy fetched from the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub client_name: String,
    pub full_name: String,
    pub contact_email: String,
    pub client_slug: String,
    pub onboarding_complete: bool,
}

impl Client {
    /// Name to greet the client with: the business name when set,
    /// the personal name otherwise.
    pub fn display_name(&self) -> &str {
        if self.client_name.is_empty() {
            &self.full_name
        } else {
            &self.client_name
        }
    }
}

/// One attempt to generate and deploy a website for a client's slug.
///
/// Multiple records may exist per client; only the most recent one
/// (by `created_at`) is relevant to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteBuild {
    pub id: SiteBuildId,
    pub status: BuildStatus,
    pub github_repo_url: Option<String>,
    pub vercel_deployment_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub error_message: Option<String>,
}

/// Build status as reported by the deployment pipeline.
///
/// The wire format is an open-ended string; statuses this code does not
/// know about are preserved in `Other` rather than dropped, so they can
/// still be displayed and round-tripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    Pending,
    Building,
    Completed,
    Failed,
    Other(String),
}

impl BuildStatus {
    /// Terminal statuses stop the dashboard's polling loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Building => "building",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for BuildStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => Self::Pending,
            "building" => Self::Building,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(status),
        }
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(BuildStatus::Completed.is_terminal());
        assert!(BuildStatus::Failed.is_terminal());
        assert!(!BuildStatus::Pending.is_terminal());
        assert!(!BuildStatus::Building.is_terminal());
        assert!(!BuildStatus::Other("queued".to_string()).is_terminal());
    }

    #[test]
    fn status_from_known_strings() {
        assert_eq!(
            BuildStatus::from("building".to_string()),
            BuildStatus::Building
        );
        assert_eq!(
            BuildStatus::from("completed".to_string()),
            BuildStatus::Completed
        );
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = BuildStatus::from("provisioning".to_string());
        assert_eq!(status, BuildStatus::Other("provisioning".to_string()));
        assert_eq!(String::from(status), "provisioning");
    }

    #[test]
    fn display_name_prefers_client_name() {
        let mut client = Client {
            id: ClientId(Uuid::nil()),
            client_name: "Acme Co".to_string(),
            full_name: "Jane Smith".to_string(),
            contact_email: "jane@acme.test".to_string(),
            client_slug: "acme".to_string(),
            onboarding_complete: true,
        };
        assert_eq!(client.display_name(), "Acme Co");

        client.client_name.clear();
        assert_eq!(client.display_name(), "Jane Smith");
    }
}
