//! Client library for the Mediashelf RPC surface.
//!
//! [`RpcClient`] calls the remote procedures; [`UploadOrchestrator`] runs the
//! credential, direct upload and mutation sequence for cover images.

pub mod error;
pub mod rpc;
pub mod upload;

pub use error::ClientError;
pub use rpc::RpcClient;
pub use upload::{UploadFile, UploadOrchestrator};
