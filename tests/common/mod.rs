//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use mocky::config::MockyConfig;
use mocky::lifecycle::{Shutdown, Startup};

/// A mock server running on an ephemeral port; shut down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Compile `spec` and serve it on 127.0.0.1 with an OS-assigned port.
pub async fn start_mocky(spec: &Path, mut config: MockyConfig) -> TestServer {
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;

    let prepared = Startup::new(spec, config)
        .prepare()
        .await
        .expect("server should start");
    let addr = prepared.listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = prepared.server.run(prepared.listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

/// HTTP client that ignores proxy environment variables.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
