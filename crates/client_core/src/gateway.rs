use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{CustomerSummary, OrderId, ProductSnapshot},
    error::remote_message,
    protocol::{CustomerRecord, OrderPayload, OrderRecord, ProductRecord},
};
use tracing::{info, warn};

use crate::error::GatewayError;

/// Supplies the bearer credential for backend calls. The gateway never reads
/// ambient session storage; whoever owns the session injects this capability.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, or none for unauthenticated backends and tests.
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Backend seam the order composer submits through.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<ProductSnapshot>, GatewayError>;
    async fn fetch_customers(&self) -> Result<Vec<CustomerSummary>, GatewayError>;
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderRecord, GatewayError>;
    async fn update_order(
        &self,
        id: OrderId,
        payload: &OrderPayload,
    ) -> Result<OrderRecord, GatewayError>;
}

/// Backend seam for the generic entity forms (customers, expenses, ...).
/// `path` is the collection segment under `/api`, e.g. `"clients"`.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    async fn save_new(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError>;
    async fn save_existing(
        &self,
        path: &str,
        id: i64,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// reqwest-backed gateway against the back-office REST API.
pub struct HttpGateway {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = remote_message(&body);
            warn!(status = status.as_u16(), %message, "backend rejected request");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl OrderGateway for HttpGateway {
    async fn fetch_products(&self) -> Result<Vec<ProductSnapshot>, GatewayError> {
        let response = self
            .authorize(self.http.get(self.url("produits")))
            .send()
            .await?;
        let records: Vec<ProductRecord> = Self::decode(response).await?;
        info!(count = records.len(), "fetched product snapshots");
        Ok(records.into_iter().map(ProductSnapshot::from).collect())
    }

    async fn fetch_customers(&self) -> Result<Vec<CustomerSummary>, GatewayError> {
        let response = self
            .authorize(self.http.get(self.url("clients")))
            .send()
            .await?;
        let records: Vec<CustomerRecord> = Self::decode(response).await?;
        info!(count = records.len(), "fetched customers");
        Ok(records.into_iter().map(CustomerSummary::from).collect())
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderRecord, GatewayError> {
        let response = self
            .authorize(self.http.post(self.url("commandes")))
            .json(payload)
            .send()
            .await?;
        let record: OrderRecord = Self::decode(response).await?;
        info!(order_id = record.id.0, status = %record.statut, "order created");
        Ok(record)
    }

    async fn update_order(
        &self,
        id: OrderId,
        payload: &OrderPayload,
    ) -> Result<OrderRecord, GatewayError> {
        let response = self
            .authorize(self.http.put(self.url(&format!("commandes/{}", id.0))))
            .json(payload)
            .send()
            .await?;
        let record: OrderRecord = Self::decode(response).await?;
        info!(order_id = record.id.0, status = %record.statut, "order updated");
        Ok(record)
    }
}

#[async_trait]
impl EntityGateway for HttpGateway {
    async fn save_new(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn save_existing(
        &self,
        path: &str,
        id: i64,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let response = self
            .authorize(self.http.put(self.url(&format!("{path}/{id}"))))
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
