use moka::future::Cache;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::models::project::{Stage, DEFAULT_PLANNED_STAGES};
use crate::models::upstream::{
    ApiCompletionDesignResponse, ApiProjectResponse, ApiWellInformationResponse,
};

/// Tokens are refreshed this long before the upstream says they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Lifetime assumed when the token response omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct OilfieldApiConfig {
    pub base_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub cache_ttl_secs: u64,
    pub timeout_secs: u64,
}

impl OilfieldApiConfig {
    fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Upstream credentials are not configured")]
    MissingCredentials,
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Upstream response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Upstream returned no records")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Client for the upstream oilfield data API.
///
/// The `get_*` methods never fail: any upstream problem is logged and
/// answered with fixed fallback data so the application keeps working
/// offline. The `try_*` methods expose the underlying errors.
#[derive(Clone)]
pub struct OilfieldApiService {
    client: Client,
    config: Arc<OilfieldApiConfig>,
    token: Arc<RwLock<Option<CachedToken>>>,
    well_cache: Arc<Cache<String, ApiWellInformationResponse>>,
    design_cache: Arc<Cache<String, ApiCompletionDesignResponse>>,
}

impl OilfieldApiService {
    pub fn new(config: OilfieldApiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let ttl = Duration::from_secs(config.cache_ttl_secs);
        let well_cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(ttl)
            .build();
        let design_cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(ttl)
            .build();

        Ok(Self {
            client,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(None)),
            well_cache: Arc::new(well_cache),
            design_cache: Arc::new(design_cache),
        })
    }

    pub async fn get_project_by_number(&self, project_number: &str) -> ApiProjectResponse {
        match self.try_project_by_number(project_number).await {
            Ok(project) => project,
            Err(e) => {
                tracing::warn!(
                    project_number = %project_number,
                    error = %e,
                    "Project lookup failed, using fallback data"
                );
                ApiProjectResponse::fallback(project_number)
            }
        }
    }

    pub async fn get_well_info(&self, well_id: &str) -> ApiWellInformationResponse {
        match self.try_well_info(well_id).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(
                    well_id = %well_id,
                    error = %e,
                    "Well information lookup failed, using fallback data"
                );
                ApiWellInformationResponse::fallback(well_id)
            }
        }
    }

    pub async fn get_completion_design(&self, well_id: &str) -> ApiCompletionDesignResponse {
        match self.try_completion_design(well_id).await {
            Ok(design) => design,
            Err(e) => {
                tracing::warn!(
                    well_id = %well_id,
                    error = %e,
                    "Completion design lookup failed, using fallback data"
                );
                ApiCompletionDesignResponse::fallback()
            }
        }
    }

    /// Stage slots `0..=planned` offered by the stage picker
    pub async fn stages_for_well(&self, well_id: &str) -> Vec<Stage> {
        let design = self.get_completion_design(well_id).await;
        let planned = if design.planned_number_of_stages > 0 {
            design.planned_number_of_stages
        } else {
            DEFAULT_PLANNED_STAGES
        };

        (0..=planned)
            .map(|number| Stage {
                id: format!("{}-stage-{}", well_id, number),
                number,
                well_id: well_id.to_string(),
            })
            .collect()
    }

    pub async fn try_project_by_number(
        &self,
        project_number: &str,
    ) -> Result<ApiProjectResponse, GatewayError> {
        tracing::info!("Fetching project {} from upstream", project_number);
        self.fetch_first("/v1/project/", ("project_number", project_number))
            .await
    }

    pub async fn try_well_info(
        &self,
        well_id: &str,
    ) -> Result<ApiWellInformationResponse, GatewayError> {
        if let Some(cached) = self.well_cache.get(well_id).await {
            tracing::debug!("Cache hit for well information {}", well_id);
            return Ok(cached);
        }

        let info: ApiWellInformationResponse = self
            .fetch_first("/v1/generalWellInformation", ("well_id", well_id))
            .await?;
        self.well_cache
            .insert(well_id.to_string(), info.clone())
            .await;

        Ok(info)
    }

    pub async fn try_completion_design(
        &self,
        well_id: &str,
    ) -> Result<ApiCompletionDesignResponse, GatewayError> {
        if let Some(cached) = self.design_cache.get(well_id).await {
            tracing::debug!("Cache hit for completion design {}", well_id);
            return Ok(cached);
        }

        let design: ApiCompletionDesignResponse = self
            .fetch_first("/v1/completionDesign", ("well_id", well_id))
            .await?;
        self.design_cache
            .insert(well_id.to_string(), design.clone())
            .await;

        Ok(design)
    }

    /// GET a resource endpoint and return the first element of its array
    async fn fetch_first<T: DeserializeOwned>(
        &self,
        path: &str,
        query: (&str, &str),
    ) -> Result<T, GatewayError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header(header::ACCEPT, "application/json")
            .query(&[query])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                *self.token.write().await = None;
            }
            let body = response.text().await?;
            return Err(GatewayError::Status { status, body });
        }

        let body = response.text().await?;
        let records: Vec<T> = serde_json::from_str(&body)?;
        records.into_iter().next().ok_or(GatewayError::Empty)
    }

    /// Bearer token from the client-credentials exchange, reused until
    /// shortly before it expires
    async fn access_token(&self) -> Result<String, GatewayError> {
        if !self.config.has_credentials() {
            return Err(GatewayError::MissingCredentials);
        }

        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another request may have refreshed it while we waited
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.access_token.clone());
        }

        tracing::info!("Requesting upstream access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(header::ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(GatewayError::Status { status, body });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        tracing::debug!(
            token_type = %token.token_type,
            expires_in = lifetime,
            "Obtained upstream access token"
        );

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        });

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> OilfieldApiConfig {
        OilfieldApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token_url: "http://127.0.0.1:9/oauth/token".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            cache_ttl_secs: 60,
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_fall_back() {
        let api = OilfieldApiService::new(offline_config()).unwrap();

        assert!(matches!(
            api.try_project_by_number("7").await,
            Err(GatewayError::MissingCredentials)
        ));

        let project = api.get_project_by_number("7").await;
        assert_eq!(project, ApiProjectResponse::fallback("7"));

        let info = api.get_well_info("w-9").await;
        assert_eq!(info.well_name, "Well w-9");
    }

    #[tokio::test]
    async fn test_stages_cover_zero_through_planned() {
        let api = OilfieldApiService::new(offline_config()).unwrap();
        let stages = api.stages_for_well("w-1").await;

        assert_eq!(stages.len(), 27);
        assert_eq!(stages[0].id, "w-1-stage-0");
        assert_eq!(stages[26].number, 26);
    }

    #[test]
    fn test_token_freshness_respects_margin() {
        let nearly_expired = CachedToken {
            access_token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(10),
        };
        let fresh = CachedToken {
            access_token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(600),
        };
        assert!(!nearly_expired.is_fresh());
        assert!(fresh.is_fresh());
    }
}
