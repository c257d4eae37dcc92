use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{AppConfig, CLIENT_PIN_HEADER, CLIENT_TOKEN_HEADER};
use crate::error::ApiError;
use crate::models::{ClientCredentials, HistoryPoint, Snapshot};
use crate::storage::PinStore;

/// HTTP client for the CRM backend.
///
/// Every request carries the deployment's client token; the stored PIN is
/// read at send time so a PIN entered after construction is still picked up.
#[derive(Clone)]
pub struct CrmClient {
    config: AppConfig,
    pins: PinStore,
}

impl CrmClient {
    pub fn new(config: AppConfig, pins: PinStore) -> Self {
        Self { config, pins }
    }

    fn authorize(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.config.client_token {
            builder = builder.header(CLIENT_TOKEN_HEADER, token);
        }
        if let Some(pin) = self.pins.get() {
            builder = builder.header(CLIENT_PIN_HEADER, &pin);
        }
        builder
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let resp = self.authorize(Request::get(url)).send().await?;
        decode(resp).await
    }

    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Response, ApiError> {
        debug!("POST {}", url);
        let resp = self.authorize(Request::post(url)).json(body)?.send().await?;
        ApiError::check_status(resp.status())?;
        Ok(resp)
    }

    /// The backend resolves the client from the token header, so the id in
    /// the path is a placeholder.
    pub async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>, ApiError> {
        self.get_json(&self.config.crm_url("/clients/0/snapshots"))
            .await
    }

    pub async fn fetch_history(&self) -> Result<Vec<HistoryPoint>, ApiError> {
        self.get_json(&self.config.crm_url("/history")).await
    }

    /// Issues a fresh token and PIN for `client_id`.
    pub async fn reset_credentials(&self, client_id: u64) -> Result<ClientCredentials, ApiError> {
        let url = self
            .config
            .admin_url(&format!("/clients/{}/credentials/reset", client_id));
        debug!("POST {}", url);
        let resp = self.authorize(Request::post(&url)).send().await?;
        let credentials: ClientCredentials = decode(resp).await?;
        info!("credentials reset for client {}", credentials.client_id);
        Ok(credentials)
    }

    pub async fn update_token(&self, client_id: u64, token: &str) -> Result<(), ApiError> {
        let url = self.config.admin_url(&format!("/clients/{}/token", client_id));
        self.post_json(&url, &TokenUpdate { client_token: token })
            .await?;
        Ok(())
    }

    pub async fn update_pin(&self, client_id: u64, pin: Option<&str>) -> Result<(), ApiError> {
        let url = self.config.admin_url(&format!("/clients/{}/pin", client_id));
        self.post_json(&url, &PinUpdate { client_pin: pin }).await?;
        Ok(())
    }
}

impl PartialEq for CrmClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.pins == other.pins
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    ApiError::check_status(resp.status())?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenUpdate<'a> {
    client_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PinUpdate<'a> {
    client_pin: Option<&'a str>,
}
