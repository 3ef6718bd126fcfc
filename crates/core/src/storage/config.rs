//! Storage configuration types.

use std::path::PathBuf;

use mediashelf_shared::config::{StorageProviderSettings, StorageSettings};
use serde::{Deserialize, Serialize};

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, AWS S3, DigitalOcean Spaces
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region (`auto` for R2).
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider (Cloudflare R2, AWS S3).
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Presigned upload URL TTL in seconds (default: 300 = 5 minutes).
    pub presign_upload_ttl_secs: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
    /// Base URL under which stored objects are publicly readable.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Default max file size: 10 MiB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
    /// Default upload TTL: 5 minutes.
    pub const DEFAULT_UPLOAD_TTL: u64 = 300;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            presign_upload_ttl_secs: Self::DEFAULT_UPLOAD_TTL,
            allowed_mime_types: Self::default_mime_types(),
            public_base_url: None,
        }
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set presigned upload URL TTL.
    #[must_use]
    pub fn with_upload_ttl(mut self, secs: u64) -> Self {
        self.presign_upload_ttl_secs = secs;
        self
    }

    /// Set allowed MIME types.
    #[must_use]
    pub fn with_allowed_mime_types(mut self, types: Vec<String>) -> Self {
        self.allowed_mime_types = types;
        self
    }

    /// Set the public base URL for stored objects.
    #[must_use]
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    /// Default allowed MIME types for cover images.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        ["image/png", "image/jpeg", "image/gif", "image/webp", "image/avif"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    }
}

impl From<StorageSettings> for StorageConfig {
    fn from(settings: StorageSettings) -> Self {
        let provider = match settings.provider {
            StorageProviderSettings::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => StorageProvider::s3(endpoint, bucket, access_key_id, secret_access_key, region),
            StorageProviderSettings::LocalFs { root } => StorageProvider::local_fs(root),
        };

        let mut config = Self::new(provider)
            .with_max_file_size(settings.max_file_size)
            .with_upload_ttl(settings.presign_upload_ttl_secs);
        if let Some(types) = settings.allowed_mime_types {
            config = config.with_allowed_mime_types(types);
        }
        if let Some(url) = settings.public_base_url {
            config = config.with_public_base_url(url);
        }
        config
    }
}
