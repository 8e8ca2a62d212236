//! Paydesk API composition root.

#![forbid(unsafe_code)]

mod dev_seed;
mod dto;
mod error;
mod handlers;
mod router;
mod state;

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use paydesk_application::{
    AccessProjector, DirectoryClient, RbacStore, RbacSyncService, SessionAccess,
};
use paydesk_core::AppError;
use paydesk_infrastructure::{HttpDirectoryClient, InMemoryDirectory};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::state::AppState;

#[derive(Debug, Clone)]
struct ApiConfig {
    api_host: String,
    api_port: u16,
    frontend_url: String,
    directory: DirectoryConfig,
}

#[derive(Debug, Clone)]
enum DirectoryConfig {
    /// Seeded in-memory directory for development.
    Memory,
    /// Gateway REST directory.
    Http { base_url: String, timeout: Duration },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let directory: Arc<dyn DirectoryClient> = match &config.directory {
        DirectoryConfig::Memory => {
            let directory = Arc::new(InMemoryDirectory::new());
            dev_seed::seed_directory(&directory).await;
            info!("using seeded in-memory directory");
            directory
        }
        DirectoryConfig::Http { base_url, timeout } => {
            info!(base_url = %base_url, "using HTTP directory");
            Arc::new(HttpDirectoryClient::new(base_url.clone(), *timeout)?)
        }
    };

    let store = Arc::new(RbacStore::new());
    let session = Arc::new(SessionAccess::new());
    let projector_handle = AccessProjector::spawn(&store, session.clone());
    let sync_service = RbacSyncService::new(store.clone(), directory);

    sync_service.refresh_all().await;

    let app_state = AppState {
        store,
        sync_service,
        session,
    };

    let router = router::build_router(app_state, config.frontend_url.as_str())?;

    let ip_address = IpAddr::from_str(config.api_host.as_str()).map_err(|error| {
        AppError::Validation(format!(
            "invalid API_HOST value '{}': {error}",
            config.api_host
        ))
    })?;
    let address = SocketAddr::new(ip_address, config.api_port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "paydesk-api listening");
    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))?;

    projector_handle.abort();
    Ok(())
}

impl ApiConfig {
    fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = parse_env_u16("API_PORT", 3001)?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let directory_mode =
            env::var("DIRECTORY_MODE").unwrap_or_else(|_| "memory".to_owned());
        let directory = match directory_mode.as_str() {
            "memory" => DirectoryConfig::Memory,
            "http" => {
                let base_url = required_env("DIRECTORY_BASE_URL")?;
                Url::parse(base_url.as_str()).map_err(|error| {
                    AppError::Validation(format!(
                        "invalid DIRECTORY_BASE_URL value '{base_url}': {error}"
                    ))
                })?;
                let timeout_secs = parse_env_u16("DIRECTORY_TIMEOUT_SECS", 15)?;
                DirectoryConfig::Http {
                    base_url,
                    timeout: Duration::from_secs(u64::from(timeout_secs)),
                }
            }
            other => {
                return Err(AppError::Validation(format!(
                    "DIRECTORY_MODE must be 'memory' or 'http', got '{other}'"
                )));
            }
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            directory,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, AppError> {
    match env::var(name) {
        Ok(value) => value.parse::<u16>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
