use std::net::SocketAddr;

use serde::Deserialize;
use chatrelay_core::error::{RelayError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RelayError::UnsupportedVersion);
        }

        self.gateway.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Per-connection outbound queue depth (frames).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Connection report period; 0 disables it.
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    #[serde(default = "default_bind_retries")]
    pub bind_retries: u32,

    #[serde(default = "default_bind_retry_delay_ms")]
    pub bind_retry_delay_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            outbound_queue: default_outbound_queue(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            report_interval_ms: default_report_interval_ms(),
            bind_retries: default_bind_retries(),
            bind_retry_delay_ms: default_bind_retry_delay_ms(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen
            .parse::<SocketAddr>()
            .map_err(|e| RelayError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}")))?;
        if !(1..=65536).contains(&self.outbound_queue) {
            return Err(RelayError::BadRequest(
                "gateway.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(RelayError::BadRequest(
                "gateway.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(RelayError::BadRequest(
                "gateway.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(RelayError::BadRequest(
                "gateway.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        if self.report_interval_ms != 0 && self.report_interval_ms < 1000 {
            return Err(RelayError::BadRequest(
                "gateway.report_interval_ms must be 0 (disabled) or at least 1000".into(),
            ));
        }
        if self.bind_retries == 0 {
            return Err(RelayError::BadRequest(
                "gateway.bind_retries must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Listen address, with the port optionally overridden from the command line.
    pub fn listen_addr(&self, port: Option<u16>) -> Result<SocketAddr> {
        let mut addr: SocketAddr = self
            .listen
            .parse()
            .map_err(|e| RelayError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}")))?;
        if let Some(port) = port {
            addr.set_port(port);
        }
        Ok(addr)
    }
}

fn default_listen() -> String {
    "0.0.0.0:8887".into()
}
fn default_outbound_queue() -> usize {
    1024
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}
fn default_report_interval_ms() -> u64 {
    30000
}
fn default_bind_retries() -> u32 {
    3
}
fn default_bind_retry_delay_ms() -> u64 {
    2000
}
