//! HTTP implementation of [`RagBackend`](crate::RagBackend).

use async_trait::async_trait;
use reqwest::{
    header::ACCEPT,
    multipart::{Form, Part},
    Client,
};
use serde_json::Value;
use shared::{
    domain::SelectedDocument,
    protocol::{
        status_message, ErrorBody, HealthResponse, QueryRequest, QueryResponse, UploadResponse,
        UPLOAD_FIELD_NAME,
    },
};
use tracing::{debug, warn};

use crate::{
    config::{Endpoints, Settings, SettingsError},
    error::{HealthError, QueryError, UploadError},
    RagBackend,
};

pub struct HttpRagBackend {
    http: Client,
    endpoints: Endpoints,
}

impl HttpRagBackend {
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, settings.endpoints()?))
    }

    pub fn with_client(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[async_trait]
impl RagBackend for HttpRagBackend {
    async fn upload_document(
        &self,
        document: SelectedDocument,
    ) -> Result<UploadResponse, UploadError> {
        let SelectedDocument {
            display_name,
            media_type,
            bytes,
        } = document;
        let part = Part::bytes(bytes)
            .file_name(display_name)
            .mime_str(&media_type)
            .map_err(|err| UploadError::Transport {
                reason: err.to_string(),
            })?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http
            .post(self.endpoints.upload.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| UploadError::Transport {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoints.upload, status = status.as_u16(), "upload rejected by server");
            return Err(UploadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|err| UploadError::Transport {
            reason: err.to_string(),
        })?;
        serde_json::from_slice::<UploadResponse>(&body).map_err(|err| {
            UploadError::MalformedResponse {
                reason: err.to_string(),
            }
        })
    }

    async fn query(&self, query: &str) -> Result<String, QueryError> {
        let response = self
            .http
            .post(self.endpoints.query.clone())
            .header(ACCEPT, "application/json")
            .json(&QueryRequest {
                query: query.to_string(),
            })
            .send()
            .await
            .map_err(|err| QueryError::Transport {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            // Unreadable or non-JSON error bodies fall back to the status line.
            let message = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                    .map(|body| body.resolve_message(code))
                    .unwrap_or_else(|_| status_message(code)),
                Err(_) => status_message(code),
            };
            warn!(endpoint = %self.endpoints.query, status = code, %message, "query rejected by server");
            return Err(QueryError::Status {
                status: code,
                message,
            });
        }

        let body = response.bytes().await.map_err(|err| QueryError::Transport {
            reason: err.to_string(),
        })?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|err| QueryError::MalformedResponse {
                reason: err.to_string(),
            })?;
        let parsed = QueryResponse::from_value(&value);
        if parsed.response.is_none() {
            debug!(endpoint = %self.endpoints.query, "query reply carried no response field");
        }
        Ok(parsed.into_answer())
    }

    async fn health(&self) -> Result<HealthResponse, HealthError> {
        let response = self
            .http
            .get(self.endpoints.health.clone())
            .send()
            .await
            .map_err(|err| HealthError::Transport {
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(HealthError::Status {
                status: status.as_u16(),
            });
        }
        response
            .json::<HealthResponse>()
            .await
            .map_err(|err| HealthError::MalformedResponse {
                reason: err.to_string(),
            })
    }
}
