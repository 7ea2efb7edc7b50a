use async_trait::async_trait;
use thiserror::Error;

pub mod blackcat;
pub mod types;

pub use blackcat::BlackCatClient;
pub use types::{CreateTransactionRequest, GatewayTransaction};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unreadable gateway response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid gateway endpoint {0}")]
    InvalidEndpoint(String),
}

/// Outbound side of the proxy. Implementations return whatever JSON the
/// gateway answered with; business failures are not errors at this level.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<GatewayTransaction, GatewayError>;

    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<GatewayTransaction, GatewayError>;
}
