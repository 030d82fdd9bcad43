use crate::{Client, ClientId, SiteBuild, requests, responses};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Shown when a status-check error response carries no usable error text.
pub const DEFAULT_CHECK_STATUS_ERROR: &str =
    "Failed to check account status. Please try again.";

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Check the onboarding status for an authenticated email address.
    ///
    /// A success response carries the redirect target for the browser.
    /// A non-2xx response is surfaced with the backend's error text, or a
    /// default message when the body has none. There is no automatic retry.
    pub async fn check_status(
        &self,
        details: &requests::CheckStatus,
    ) -> Result<responses::CheckStatusOutcome, ClientError> {
        let response = self.post("onboard/check-status", details).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            return Err(ClientError::APIError(status, error_display_text(&body)));
        }
        Ok(response.json().await?)
    }
}

/// A read-only client for the hosted data store's REST interface.
///
/// The dashboard never creates or mutates rows; this type intentionally
/// exposes reads only.
pub struct StoreClient {
    pub address: String,
    pub anon_key: String,
    pub inner_client: reqwest::Client,
}

impl StoreClient {
    fn format_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", &self.address)
    }

    async fn get(&self, table: &str, query: &[(&str, String)]) -> ReqwestResult {
        self.inner_client
            .get(self.format_url(table))
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
    }

    /// Fetch the client record by identifier. Zero rows is an error; the
    /// dashboard cannot render anything without its client.
    pub async fn client_by_id(
        &self,
        client_id: &ClientId,
    ) -> Result<Client, ClientError> {
        let response = self
            .get(
                "clients",
                &[
                    ("id", format!("eq.{client_id}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        let rows: Vec<Client> = ok_body(response).await?;
        rows.into_iter().next().ok_or_else(|| {
            ClientError::APIError(
                StatusCode::NOT_FOUND,
                "Client not found".to_string(),
            )
        })
    }

    /// Fetch the most recent build record for a client's slug, if any.
    ///
    /// Ordered by creation time descending, limited to one row; an empty
    /// result means no build has started yet.
    pub async fn latest_site_build(
        &self,
        client_slug: &str,
    ) -> Result<Option<SiteBuild>, ClientError> {
        let response = self
            .get(
                "site_builds",
                &[
                    ("client_slug", format!("eq.{client_slug}")),
                    ("order", "created_at.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        let rows: Vec<SiteBuild> = ok_body(response).await?;
        Ok(rows.into_iter().next())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Extract the display text from an error-response body: the `error` field
/// when present and non-empty, a default message otherwise.
pub fn error_display_text(body: &str) -> String {
    serde_json::from_str::<responses::ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| DEFAULT_CHECK_STATUS_ERROR.to_string())
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_from_body() {
        assert_eq!(
            error_display_text(r#"{"error": "Account not found"}"#),
            "Account not found"
        );
    }

    #[test]
    fn default_error_text_when_body_is_unusable() {
        assert_eq!(error_display_text("{}"), DEFAULT_CHECK_STATUS_ERROR);
        assert_eq!(
            error_display_text(r#"{"error": ""}"#),
            DEFAULT_CHECK_STATUS_ERROR
        );
        assert_eq!(
            error_display_text("internal server error"),
            DEFAULT_CHECK_STATUS_ERROR
        );
    }

    #[test]
    fn api_error_displays_its_message() {
        let err = ClientError::APIError(
            StatusCode::NOT_FOUND,
            "Account not found".to_string(),
        );
        assert_eq!(err.to_string(), "Account not found");
    }
}
