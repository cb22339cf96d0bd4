use anyhow::Context as _;
use url::Url;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3030;

/// Where the library backend lives. Flags beat environment variables beat
/// defaults.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub host: String,
    pub port: u16,
}

impl BackendConfig {
    pub fn resolve(host_flag: Option<String>, port_flag: Option<u16>) -> anyhow::Result<Self> {
        let host = host_flag
            .or_else(|| std::env::var("SHELFCTL_HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());

        let port = match port_flag {
            Some(port) => port,
            None => match std::env::var("SHELFCTL_PORT") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("parse SHELFCTL_PORT: {raw}"))?,
                Err(_) => DEFAULT_PORT,
            },
        };

        Ok(Self { host, port })
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        let raw = format!("http://{}:{}", self.host, self.port);
        Url::parse(&raw).with_context(|| format!("parse backend url: {raw}"))
    }
}
