use std::{env, fmt, path::PathBuf};

pub const DEFAULT_GATEWAY_URL: &str = "https://api.blackcatpagamentos.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub credentials: Option<GatewayCredentials>,
}

/// Public/secret key pair sent as HTTP Basic auth on every gateway call.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub public_key: String,
    pub secret_key: String,
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"***")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        host.parse::<std::net::IpAddr>()
            .map_err(|e| anyhow::anyhow!("invalid APP_HOST {host:?}: {e}"))?;
        let port = get("APP_PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let base_url = get("BLACKCAT_API_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let credentials = match (get("BLACKCAT_PUBLIC_KEY"), get("BLACKCAT_SECRET_KEY")) {
            (Some(public_key), Some(secret_key)) => Some(GatewayCredentials {
                public_key,
                secret_key,
            }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            static_dir,
            gateway: GatewayConfig {
                base_url,
                credentials,
            },
        })
    }
}
