//! Telemetry emitter implementations
//!
//! Emitters forward finished telemetry messages to their destination
//! (HTTP, UDP, file, stdout). Delivery is at-most-once: the vehicle loop
//! logs a failed emit and moves on, so emitters just report errors and
//! keep their own latency bounded.

use anyhow::{Context, Result};
use async_trait::async_trait;
use fleetsim_core::{TelemetryEmitter, TelemetryMessage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_http_timeout_secs() -> f64 {
    1.0
}

/// Emitter selection, deserialized from the `[emitter]` config section.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmitterConfig {
    Http {
        url: String,
        /// Request timeout so a hung backend cannot stall the tick loop
        #[serde(default = "default_http_timeout_secs")]
        timeout_secs: f64,
    },
    Udp {
        host: String,
        port: u16,
    },
    File {
        path: String,
    },
    Stdout,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        EmitterConfig::Stdout
    }
}

/// HTTP POST emitter
pub struct HttpEmitter {
    url: String,
    client: reqwest::Client,
}

impl HttpEmitter {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("unable to build HTTP client")?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl TelemetryEmitter for HttpEmitter {
    async fn emit(&mut self, message: &TelemetryMessage) -> Result<()> {
        self.client
            .post(&self.url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// UDP datagram emitter
pub struct UdpEmitter {
    socket: std::net::UdpSocket,
    addr: std::net::SocketAddr,
}

impl UdpEmitter {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let socket = std::net::UdpSocket::bind("0.0.0.0:0")?;
        socket.set_nonblocking(true)?;
        let addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid UDP emitter address {}:{}", host, port))?;
        Ok(Self { socket, addr })
    }
}

#[async_trait]
impl TelemetryEmitter for UdpEmitter {
    async fn emit(&mut self, message: &TelemetryMessage) -> Result<()> {
        let json = serde_json::to_string(message)?;
        self.socket.send_to(json.as_bytes(), self.addr)?;
        Ok(())
    }
}

/// File emitter (NDJSON append)
pub struct FileEmitter {
    file: std::fs::File,
}

impl FileEmitter {
    pub fn new(path: &str) -> Result<Self> {
        use std::fs::OpenOptions;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("unable to open emitter file {}", path))?;
        Ok(Self { file })
    }
}

#[async_trait]
impl TelemetryEmitter for FileEmitter {
    async fn emit(&mut self, message: &TelemetryMessage) -> Result<()> {
        use std::io::Write;
        writeln!(self.file, "{}", serde_json::to_string(message)?)?;
        Ok(())
    }
}

/// Stdout emitter (NDJSON), the default; lets the simulator run with no
/// backend at all.
pub struct StdoutEmitter;

#[async_trait]
impl TelemetryEmitter for StdoutEmitter {
    async fn emit(&mut self, message: &TelemetryMessage) -> Result<()> {
        println!("{}", serde_json::to_string(message)?);
        Ok(())
    }
}

/// Create an emitter from configuration.
pub fn create_emitter(config: &EmitterConfig) -> Result<Box<dyn TelemetryEmitter>> {
    match config {
        EmitterConfig::Http { url, timeout_secs } => Ok(Box::new(HttpEmitter::new(
            url.clone(),
            Duration::from_secs_f64(*timeout_secs),
        )?)),
        EmitterConfig::Udp { host, port } => Ok(Box::new(UdpEmitter::new(host, *port)?)),
        EmitterConfig::File { path } => Ok(Box::new(FileEmitter::new(path)?)),
        EmitterConfig::Stdout => Ok(Box::new(StdoutEmitter)),
    }
}
