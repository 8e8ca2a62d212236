//! Infrastructure adapters for the Paydesk RBAC access subsystem.

#![forbid(unsafe_code)]

mod http_directory_client;
mod in_memory_directory;

pub use http_directory_client::HttpDirectoryClient;
pub use in_memory_directory::InMemoryDirectory;
