//! Upload procedures: presigned direct uploads and deletes.

mod error;
mod service;
mod types;

pub use error::UploadError;
pub use service::UploadService;
pub use types::{DeleteFileRequest, DeleteFileResponse, PresignRequest, UploadCredential};
