use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{AdvancedSearchRequest, Profile, ProfilesResponse, RiskScore, RiskScoresResponse};

/// Client for the SecZetta non-employee risk API.
///
/// Every call carries the three headers the API expects: a JSON content
/// type, a `Token token=<key>` authorization, and a JSON accept header.
/// Each call is a single best-effort attempt with no retry.
#[derive(Debug, Clone)]
pub struct SecZettaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SecZettaClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn token_header(&self) -> String {
        format!("Token token={}", self.api_key)
    }

    /// Resolve profiles whose configured attribute matches the lookup value.
    pub async fn search_profiles(
        &self,
        profile_type_id: Option<&str>,
        attribute_id: Option<&str>,
        lookup_value: &str,
    ) -> Result<Vec<Profile>, AppError> {
        let url = format!("{}/advanced_search/run", self.base_url);
        let body = AdvancedSearchRequest::for_lookup(profile_type_id, attribute_id, lookup_value);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.token_header())
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Profile search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Profile search returned {}: {}",
                status, error_text
            )));
        }

        let profiles = response
            .json::<ProfilesResponse>()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to parse profile search response: {}", e))
            })?;

        Ok(profiles.profiles)
    }

    /// Fetch the risk scores recorded against a profile id.
    pub async fn fetch_risk_scores(&self, object_id: Uuid) -> Result<Vec<RiskScore>, AppError> {
        let url = format!("{}/risk_scores?object_id={}", self.base_url, object_id);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, self.token_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Risk score request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Risk score request returned {}: {}",
                status, error_text
            )));
        }

        let scores = response
            .json::<RiskScoresResponse>()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to parse risk score response: {}", e))
            })?;

        Ok(scores.risk_scores)
    }
}
