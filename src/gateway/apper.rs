use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::gateway::traits::Gateway;
use crate::gateway::types::{
    CreateParams, DeleteParams, FetchParams, FetchResponse, FieldSelection, MutationResponse, Table,
};
use crate::models::RecordId;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

const PROJECT_HEADER: &str = "X-Apper-Project-Id";
const KEY_HEADER: &str = "X-Apper-Public-Key";

/// HTTP client for a hosted Apper project
pub struct ApperClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApperClient {
    /// Create a client for the given project.
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("nestquest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            credentials,
        })
    }

    fn records_url(&self, table: Table) -> String {
        format!("{}/tables/{}/records", self.base_url, table)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(PROJECT_HEADER, &self.credentials.project_id)
            .header(KEY_HEADER, &self.credentials.public_key)
    }

    async fn send<B, T>(&self, method: Method, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);

        let response = self.request(method, url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gateway returned status: {}", status);
            return Err(Error::Status { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes from gateway", bytes.len());
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Gateway for ApperClient {
    async fn fetch_records(&self, table: Table, params: &FetchParams) -> Result<FetchResponse> {
        let url = format!("{}/query", self.records_url(table));
        self.send(Method::POST, url, params).await
    }

    async fn create_record(&self, table: Table, params: &CreateParams) -> Result<MutationResponse> {
        self.send(Method::POST, self.records_url(table), params).await
    }

    async fn delete_record(&self, table: Table, params: &DeleteParams) -> Result<MutationResponse> {
        self.send(Method::DELETE, self.records_url(table), params).await
    }

    async fn get_record_by_id(
        &self,
        table: Table,
        id: RecordId,
        params: &FieldSelection,
    ) -> Result<FetchResponse<Value>> {
        let url = format!("{}/{}", self.records_url(table), id);
        self.send(Method::POST, url, params).await
    }

    fn backend_name(&self) -> &'static str {
        "Apper"
    }
}
