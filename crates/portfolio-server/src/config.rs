//! Server Configuration

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Which front end serves the tool registry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transport {
    /// Line-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// REST endpoints on `BIND_ADDR`
    Http,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            other => bail!("PORTFOLIO_TRANSPORT must be 'stdio' or 'http', got '{}'", other),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(f, "stdio"),
            Self::Http => write!(f, "http"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub transport: Transport,
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(transport) = lookup("PORTFOLIO_TRANSPORT") {
            config.transport = transport.parse()?;
        }
        if let Some(addr) = lookup("BIND_ADDR").filter(|a| !a.trim().is_empty()) {
            config.bind_addr = addr.trim().to_string();
        }
        Ok(config)
    }
}
