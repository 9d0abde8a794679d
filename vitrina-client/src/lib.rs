//! Vitrina Client - network adapters for the catalog core
//!
//! Implements the document store and image upload seams of `vitrina-core`
//! over HTTP.

pub mod config;
pub mod document_store;
pub mod error;
pub mod http;
pub mod uploader;

pub use config::ClientConfig;
pub use document_store::HttpDocumentStore;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use uploader::CloudinaryUploader;
