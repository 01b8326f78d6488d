//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration (file, then CLI overrides)
//! - Load and compile the OpenAPI document
//! - Initialize telemetry
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is served
//! - The route table is complete before the listener is bound

use std::path::{Path, PathBuf};

use tokio::net::TcpListener;

use crate::config::{load_config, validate_config, ConfigError, MockyConfig};
use crate::dispatch::Dispatcher;
use crate::http::HttpServer;
use crate::observability::Telemetry;
use crate::routing::{compile, RouteTable, SpecError};
use crate::spec::{load_document, SpecLoadError};

/// Anything that stops the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load OpenAPI file: {0}")]
    SpecLoad(#[from] SpecLoadError),
    #[error("invalid OpenAPI document: {0}")]
    Spec(#[from] SpecError),
    #[error("failed to initialize metrics: {0}")]
    Telemetry(#[from] metrics_exporter_prometheus::BuildError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub otel: bool,
}

/// Load the optional config file and apply CLI overrides.
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<MockyConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => MockyConfig::default(),
    };

    if let Some(host) = &overrides.host {
        config.listener.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if overrides.debug {
        config.observability.log_level = "debug".to_string();
    }
    if overrides.otel {
        config.observability.metrics_enabled = true;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read and compile the OpenAPI document.
pub fn compile_spec(path: &Path) -> Result<RouteTable, StartupError> {
    let document = load_document(path)?;
    let table = compile(&document)?;
    tracing::info!(
        path = %path.display(),
        routes = table.len(),
        "OpenAPI spec compiled"
    );
    Ok(table)
}

/// A server ready to accept connections.
pub struct Prepared {
    pub server: HttpServer,
    pub listener: TcpListener,
}

/// Everything needed to start serving.
#[derive(Debug, Clone)]
pub struct Startup {
    pub spec_path: PathBuf,
    pub config: MockyConfig,
}

impl Startup {
    pub fn new(spec_path: impl Into<PathBuf>, config: MockyConfig) -> Self {
        Self {
            spec_path: spec_path.into(),
            config,
        }
    }

    /// Compile the document, then build and bind the server.
    pub async fn prepare(self) -> Result<Prepared, StartupError> {
        let table = compile_spec(&self.spec_path)?;

        let telemetry = if self.config.observability.metrics_enabled {
            Telemetry::install()?
        } else {
            Telemetry::disabled()
        };
        telemetry.record_routes_registered(table.len());

        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind {
                address: address.clone(),
                source,
            })?;

        let server = HttpServer::new(self.config, Dispatcher::new(table), telemetry);
        Ok(Prepared { server, listener })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            host: Some("0.0.0.0".into()),
            port: Some(9999),
            debug: true,
            otel: true,
        };
        let config = resolve_config(None, &overrides).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9999");
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_file_then_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[listener]\nhost = \"10.0.0.1\"\nport = 7000").unwrap();

        let overrides = Overrides {
            port: Some(7001),
            ..Default::default()
        };
        let config = resolve_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.bind_address(), "10.0.0.1:7001");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = Overrides {
            port: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(None, &overrides),
            Err(StartupError::Config(ConfigError::Validation(_)))
        ));
    }

    #[test]
    fn test_compile_spec_errors() {
        assert!(matches!(
            compile_spec(Path::new("/missing/openapi.yaml")),
            Err(StartupError::SpecLoad(_))
        ));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"openapi\": \"3.0.0\"}}").unwrap();
        assert!(matches!(
            compile_spec(file.path()),
            Err(StartupError::Spec(SpecError::MissingPaths))
        ));
    }

    #[tokio::test]
    async fn test_prepare_fails_before_binding() {
        let startup = Startup::new("/missing/openapi.yaml", MockyConfig::default());
        assert!(matches!(startup.prepare().await, Err(StartupError::SpecLoad(_))));
    }
}
