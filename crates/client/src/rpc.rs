//! Typed calls to `/api/v1/rpc/<procedure>`.

use std::time::Duration;

use mediashelf_core::content::{
    ContentInput, ContentListQuery, ContentPage, ContentRecord, UpdateContentInput,
};
use mediashelf_core::upload::{
    DeleteFileRequest, DeleteFileResponse, PresignRequest, UploadCredential,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

const RPC_PREFIX: &str = "/api/v1/rpc";

/// Error envelope rendered by the server.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    message: String,
}

/// RPC client bound to one server and, optionally, one bearer token.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RpcClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates an anonymous client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(Self::DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: None,
        }
    }

    /// Attaches a bearer token to every call.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// `content.getList`
    pub async fn get_list(&self, query: &ContentListQuery) -> Result<ContentPage, ClientError> {
        let request = self.http.get(self.url("content.getList")).query(query);
        self.send(request).await
    }

    /// `content.getById`
    pub async fn get_by_id(&self, id: &str) -> Result<ContentRecord, ClientError> {
        let request = self
            .http
            .get(self.url("content.getById"))
            .query(&[("id", id)]);
        self.send(request).await
    }

    /// `content.create`
    pub async fn create(&self, input: &ContentInput) -> Result<ContentRecord, ClientError> {
        let request = self.http.post(self.url("content.create")).json(input);
        self.send(request).await
    }

    /// `content.update`
    pub async fn update(&self, input: &UpdateContentInput) -> Result<ContentRecord, ClientError> {
        let request = self.http.post(self.url("content.update")).json(input);
        self.send(request).await
    }

    /// `upload.getPresignedUrl`
    pub async fn get_presigned_url(
        &self,
        request: &PresignRequest,
    ) -> Result<UploadCredential, ClientError> {
        let request = self
            .http
            .post(self.url("upload.getPresignedUrl"))
            .json(request);
        self.send(request).await
    }

    /// `upload.deleteFile`
    pub async fn delete_file(&self, key: &str) -> Result<DeleteFileResponse, ClientError> {
        let body = DeleteFileRequest {
            key: key.to_string(),
        };
        let request = self.http.post(self.url("upload.deleteFile")).json(&body);
        self.send(request).await
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}{RPC_PREFIX}/{procedure}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let bytes = response.bytes().await?;
        let err = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
            Ok(envelope) => ClientError::Api {
                status: status.as_u16(),
                code: envelope.error,
                message: envelope.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: "HTTP_ERROR".to_string(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            },
        };
        tracing::debug!(error = %err, "RPC call failed");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = RpcClient::with_http_client(Client::new(), "http://localhost:8080/");
        assert_eq!(
            client.url("content.getList"),
            "http://localhost:8080/api/v1/rpc/content.getList"
        );
    }

    #[test]
    fn test_envelope_shape() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":"NOT_FOUND","message":"content x not found"}"#)
                .unwrap();
        assert_eq!(envelope.error, "NOT_FOUND");
        assert_eq!(envelope.message, "content x not found");
    }
}
