use std::sync::Arc;

use crate::{
    config::GatewayConfig,
    gateway::{BlackCatClient, GatewayError, PaymentGateway},
};

#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when the gateway credentials were not configured.
    pub gateway: Option<Arc<dyn PaymentGateway>>,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn PaymentGateway>>) -> Self {
        Self { gateway }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let gateway = match &config.credentials {
            Some(credentials) => {
                let client = BlackCatClient::new(&config.base_url, credentials.clone())?;
                Some(Arc::new(client) as Arc<dyn PaymentGateway>)
            }
            None => None,
        };
        Ok(Self { gateway })
    }

    pub fn gateway_configured(&self) -> bool {
        self.gateway.is_some()
    }
}
