//! Application services and ports for the Paydesk RBAC access subsystem.

#![forbid(unsafe_code)]

mod access_projector;
mod directory_ports;
mod rbac_store;
mod sync_service;

pub use access_projector::{AccessProjector, SessionAccess};
pub use directory_ports::DirectoryClient;
pub use rbac_store::{CollectionStatus, MutationOutcome, RbacCollection, RbacStore};
pub use sync_service::RbacSyncService;
