//! Storage service implementation using Apache OpenDAL.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use opendal::{ErrorKind, Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Prefix shared by every object written through a presigned upload.
pub const UPLOAD_KEY_PREFIX: &str = "uploads/";

/// Presigned URL for a direct upload.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The presigned URL.
    pub url: String,
    /// HTTP method to use (PUT for upload).
    pub method: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// Required headers for the request.
    pub headers: HashMap<String, String>,
}

/// Storage service for cover images.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("provider", &self.config.provider.name())
            .field("bucket", &self.config.provider.bucket())
            .finish_non_exhaustive()
    }
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
        }
    }

    /// Validate upload request against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate presigned PUT URL for `key`, bound to `content_type`.
    ///
    /// The signature does not cover the body length: OpenDAL's presigned write
    /// takes no content length. Call [`Self::validate_upload`] before issuing a
    /// credential; the size ceiling is only enforced there.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed, presigning is not supported, or signing fails.
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<PresignedUrl, StorageError> {
        validate_upload_key(key)?;

        let ttl_secs = self.config.presign_upload_ttl_secs;
        let presigned = self
            .operator
            .presign_write_with(key, Duration::from_secs(ttl_secs))
            .content_type(content_type)
            .await
            .map_err(StorageError::from)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            expires_at: Utc::now()
                + chrono::Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX)),
            headers,
        })
    }

    /// Delete a file from storage. Missing objects are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a file exists in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot answer.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self.operator.stat(key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Public URL of a stored object, `{public_base_url}/{key}`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> Option<String> {
        self.config
            .public_base_url
            .as_deref()
            .map(|base| public_url(base, key))
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

}

/// Generate the storage key for an upload started at `at`.
///
/// Format: `uploads/{unix_millis}-{sanitized_filename}`
#[must_use]
pub fn generate_upload_key(filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "{UPLOAD_KEY_PREFIX}{}-{}",
        at.timestamp_millis(),
        sanitize_filename(filename)
    )
}

/// Check that `key` names an object under the upload prefix.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` for keys outside `uploads/`, with nested
/// paths, or with characters a generated key never contains.
pub fn validate_upload_key(key: &str) -> Result<(), StorageError> {
    let Some(name) = key.strip_prefix(UPLOAD_KEY_PREFIX) else {
        return Err(StorageError::invalid_key(format!(
            "'{key}' is not under {UPLOAD_KEY_PREFIX}"
        )));
    };

    if name.is_empty() || name.contains("..") || !name.chars().all(is_key_char) {
        return Err(StorageError::invalid_key(format!("'{key}' is malformed")));
    }

    Ok(())
}

/// Join a public base URL and a key with exactly one slash.
#[must_use]
pub fn public_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

/// Sanitize filename for storage key.
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_'
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_service(root: &std::path::Path) -> StorageService {
        let config = StorageConfig::new(StorageProvider::local_fs(root));
        StorageService::from_config(config).expect("should create service")
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("cover.png"), "cover.png");
        assert_eq!(sanitize_filename("my cover!.png"), "my_cover_.png");
        assert_eq!(sanitize_filename("my file (1).jpg"), "my_file__1_.jpg");
        assert_eq!(sanitize_filename("snake_case.webp"), "snake_case.webp");
        assert_eq!(sanitize_filename("하츄핑.webp"), "___.webp");
    }

    #[test]
    fn test_generate_upload_key() {
        let at = Utc.timestamp_millis_opt(1_759_389_368_571).unwrap();
        let key = generate_upload_key("my cover!.png", at);
        assert_eq!(key, "uploads/1759389368571-my_cover_.png");
    }

    #[test]
    fn test_same_name_different_time_different_key() {
        let first = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let second = first + chrono::Duration::milliseconds(1);
        assert_ne!(
            generate_upload_key("cover.png", first),
            generate_upload_key("cover.png", second)
        );
    }

    #[test]
    fn test_validate_upload_key() {
        assert!(validate_upload_key("uploads/1759389368571-___________.webp").is_ok());
        assert!(validate_upload_key("uploads/1-a.png").is_ok());

        for bad in [
            "",
            "uploads/",
            "covers/1-a.png",
            "/uploads/1-a.png",
            "uploads/../secrets",
            "uploads/nested/1-a.png",
            "uploads/1-a b.png",
        ] {
            assert!(
                matches!(validate_upload_key(bad), Err(StorageError::InvalidKey(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_public_url_joins_with_single_slash() {
        assert_eq!(
            public_url("https://cdn.example.com/", "uploads/1-a.png"),
            "https://cdn.example.com/uploads/1-a.png"
        );
        assert_eq!(
            public_url("https://cdn.example.com", "uploads/1-a.png"),
            "https://cdn.example.com/uploads/1-a.png"
        );
    }

    #[test]
    fn test_validate_upload_size() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            StorageConfig::new(StorageProvider::local_fs(dir.path())).with_max_file_size(1024);
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("image/png", 1024).is_ok());

        let err = service.validate_upload("image/png", 1025).unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let service = local_service(dir.path());

        assert!(service.validate_upload("image/webp", 1024).is_ok());

        let err = service
            .validate_upload("application/x-executable", 1024)
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
    }

    #[tokio::test]
    async fn test_exists_and_delete_on_local_fs() {
        let dir = tempfile::tempdir().unwrap();
        let service = local_service(dir.path());
        let key = "uploads/1700000000000-cover.png";

        assert!(!service.exists(key).await.unwrap());

        std::fs::create_dir_all(dir.path().join("uploads")).unwrap();
        std::fs::write(dir.path().join(key), b"png").unwrap();
        assert!(service.exists(key).await.unwrap());

        service.delete(key).await.unwrap();
        assert!(!service.exists(key).await.unwrap());

        // Deleting again is not an error.
        service.delete(key).await.unwrap();
    }

    #[tokio::test]
    async fn test_presign_upload_rejects_foreign_key() {
        let dir = tempfile::tempdir().unwrap();
        let service = local_service(dir.path());

        let err = service
            .presign_upload("other/1-a.png", "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_presign_upload_unsupported_on_local_fs() {
        let dir = tempfile::tempdir().unwrap();
        let service = local_service(dir.path());

        let err = service
            .presign_upload("uploads/1-a.png", "image/png")
            .await
            .unwrap_err();
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_public_url_requires_configured_base() {
        let dir = tempfile::tempdir().unwrap();
        let service = local_service(dir.path());
        assert!(service.public_url("uploads/1-a.png").is_none());

        let config = StorageConfig::new(StorageProvider::local_fs(dir.path()))
            .with_public_base_url("https://pub.example.dev");
        let service = StorageService::from_config(config).unwrap();
        assert_eq!(
            service.public_url("uploads/1-a.png").as_deref(),
            Some("https://pub.example.dev/uploads/1-a.png")
        );
    }
}
