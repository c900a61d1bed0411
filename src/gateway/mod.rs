pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::models::{Student, StudentId, StudentPayload};

pub use memory::InMemoryStudentGateway;

/// CRUD access to the student backend. Every call is a separate round trip;
/// nothing is cached.
#[async_trait]
pub trait StudentGateway: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Student>, GatewayError>;
    async fn create(&self, payload: &StudentPayload) -> Result<Student, GatewayError>;
    async fn update(&self, id: &StudentId, payload: &StudentPayload) -> Result<Student, GatewayError>;
    async fn delete(&self, id: &StudentId) -> Result<(), GatewayError>;
}

pub struct HttpStudentGateway {
    client: Client,
    base_url: String,
}

impl HttpStudentGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    fn collection_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn record_url(&self, id: &StudentId) -> String {
        format!("{}/students/{}", self.base_url, id)
    }

    async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse backend response: {}", e);
            GatewayError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl StudentGateway for HttpStudentGateway {
    async fn list_all(&self) -> Result<Vec<Student>, GatewayError> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        let records: Vec<serde_json::Value> = Self::decode(response).await?;

        let mut students = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Student>(record.clone()) {
                Ok(student) => students.push(student),
                Err(e) => {
                    warn!("Skipping malformed student record {}: {}", record, e);
                }
            }
        }

        debug!("fetched {} students", students.len());
        Ok(students)
    }

    async fn create(&self, payload: &StudentPayload) -> Result<Student, GatewayError> {
        let url = self.collection_url();
        debug!("POST {} name={}", url, payload.name);

        let response = self.client.post(&url).json(payload).send().await?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &StudentId, payload: &StudentPayload) -> Result<Student, GatewayError> {
        let url = self.record_url(id);
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(payload).send().await?;
        let response = Self::ensure_success(response).await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &StudentId) -> Result<(), GatewayError> {
        let url = self.record_url(id);
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
