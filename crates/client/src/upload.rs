//! Direct-to-storage upload flow.
//!
//! The sequence is strictly ordered: request a credential, PUT the bytes to
//! the signed URL, then hand the key to a mutation. A failed PUT discards the
//! credential; nothing is retried.

use bytes::Bytes;
use mediashelf_core::content::{ContentInput, ContentRecord, UpdateContentInput};
use mediashelf_core::upload::PresignRequest;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use crate::error::ClientError;
use crate::rpc::RpcClient;

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original filename.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw contents.
    pub bytes: Bytes,
}

impl UploadFile {
    /// Creates a file from its name, MIME type and contents.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Runs the three-step cover upload against an [`RpcClient`].
#[derive(Debug, Clone)]
pub struct UploadOrchestrator {
    rpc: RpcClient,
    max_file_size: u64,
}

impl UploadOrchestrator {
    /// Client-side size limit: 10 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Creates an orchestrator using `rpc` for procedure calls.
    pub fn new(rpc: RpcClient) -> Self {
        Self {
            rpc,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Overrides the client-side size limit.
    #[must_use]
    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// Uploads `file` and returns its storage key.
    ///
    /// The key is only returned once storage has acknowledged the bytes.
    pub async fn upload(&self, file: &UploadFile) -> Result<String, ClientError> {
        self.check(file)?;

        let credential = self
            .rpc
            .get_presigned_url(&PresignRequest {
                file_name: file.name.clone(),
                file_type: file.content_type.clone(),
                file_size: file.size(),
            })
            .await?;

        let method = Method::from_bytes(credential.method.as_bytes()).unwrap_or(Method::PUT);
        let mut request = self
            .rpc
            .http()
            .request(method, &credential.presigned_url)
            .body(file.bytes.clone());
        for (name, value) in &credential.headers {
            if !name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                request = request.header(name, value);
            }
        }
        let request = request.header(CONTENT_TYPE, &file.content_type);

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(key = %credential.key, status = status.as_u16(), "Direct upload rejected");
            return Err(ClientError::UploadFailed(status.as_u16()));
        }

        tracing::debug!(key = %credential.key, size = file.size(), "Direct upload complete");
        Ok(credential.key)
    }

    /// Uploads `cover`, if any, then creates the record with its key.
    pub async fn create_with_cover(
        &self,
        mut input: ContentInput,
        cover: Option<&UploadFile>,
    ) -> Result<ContentRecord, ClientError> {
        if let Some(file) = cover {
            input.image = Some(self.upload(file).await?);
        }
        self.rpc.create(&input).await
    }

    /// Uploads `cover`, if any, then updates the record with its key.
    ///
    /// Without a cover the record keeps whatever `input.content.image` says.
    pub async fn update_with_cover(
        &self,
        mut input: UpdateContentInput,
        cover: Option<&UploadFile>,
    ) -> Result<ContentRecord, ClientError> {
        if let Some(file) = cover {
            input.content.image = Some(self.upload(file).await?);
        }
        self.rpc.update(&input).await
    }

    fn check(&self, file: &UploadFile) -> Result<(), ClientError> {
        if file.name.trim().is_empty() {
            return Err(ClientError::InvalidFile("file name is required".to_string()));
        }
        if file.size() > self.max_file_size {
            return Err(ClientError::InvalidFile(format!(
                "file size {} bytes exceeds maximum allowed {} bytes",
                file.size(),
                self.max_file_size
            )));
        }
        Ok(())
    }
}
