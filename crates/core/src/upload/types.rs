//! Upload request and response types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for a presigned upload URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Original filename.
    #[serde(default)]
    pub file_name: String,
    /// Declared MIME type.
    pub file_type: String,
    /// Declared size in bytes.
    pub file_size: u64,
}

/// Single-use credential to write one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCredential {
    /// Signed URL.
    pub presigned_url: String,
    /// Storage key the object will be written under.
    pub key: String,
    /// HTTP method to use (PUT).
    pub method: String,
    /// Headers the upload request must carry.
    pub headers: HashMap<String, String>,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
}

/// Request to delete a stored object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    /// Storage key.
    #[serde(default)]
    pub key: String,
}

/// Delete acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    /// Always true on success.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presign_request_requires_type_and_size() {
        let missing_size = serde_json::from_value::<PresignRequest>(serde_json::json!({
            "fileName": "a.png",
            "fileType": "image/png"
        }));
        assert!(missing_size.is_err());

        let missing_type = serde_json::from_value::<PresignRequest>(serde_json::json!({
            "fileName": "a.png",
            "fileSize": 10
        }));
        assert!(missing_type.is_err());
    }

    #[test]
    fn test_presign_request_camel_case() {
        let request: PresignRequest = serde_json::from_value(serde_json::json!({
            "fileName": "my cover!.png",
            "fileType": "image/png",
            "fileSize": 500_000
        }))
        .unwrap();

        assert_eq!(request.file_name, "my cover!.png");
        assert_eq!(request.file_type, "image/png");
        assert_eq!(request.file_size, 500_000);
    }
}
