use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::GatewayCredentials;

use super::{CreateTransactionRequest, GatewayError, GatewayTransaction, PaymentGateway};

const TRANSACTIONS_PATH: &str = "v1/transactions";

/// reqwest-backed client for the BlackCat transactions API.
#[derive(Debug, Clone)]
pub struct BlackCatClient {
    http: Client,
    endpoint: Url,
    credentials: GatewayCredentials,
}

impl BlackCatClient {
    pub fn new(base_url: &str, credentials: GatewayCredentials) -> Result<Self, GatewayError> {
        let http = Client::builder().build()?;
        Self::with_client(http, base_url, credentials)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        credentials: GatewayCredentials,
    ) -> Result<Self, GatewayError> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join(TRANSACTIONS_PATH))
            .map_err(|e| GatewayError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(GatewayError::InvalidEndpoint(base_url.to_string()));
        }

        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transaction_url(&self, transaction_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(transaction_id);
        }
        url
    }
}

/// Reads the whole body before decoding so a bad payload surfaces as
/// `GatewayError::Decode` rather than a transport error.
async fn decode(response: reqwest::Response) -> Result<GatewayTransaction, GatewayError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl PaymentGateway for BlackCatClient {
    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<GatewayTransaction, GatewayError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .basic_auth(&self.credentials.public_key, Some(&self.credentials.secret_key))
            .json(request)
            .send()
            .await?;
        tracing::debug!(status = %response.status(), "gateway create response");

        decode(response).await
    }

    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<GatewayTransaction, GatewayError> {
        let response = self
            .http
            .get(self.transaction_url(transaction_id))
            .basic_auth(&self.credentials.public_key, Some(&self.credentials.secret_key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        tracing::debug!(status = %response.status(), "gateway status response");

        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> GatewayCredentials {
        GatewayCredentials {
            public_key: "pk".into(),
            secret_key: "sk".into(),
        }
    }

    #[test]
    fn endpoint_is_joined_onto_the_base_url() {
        let client = BlackCatClient::new("https://api.example.com", creds()).unwrap();
        assert_eq!(client.endpoint().as_str(), "https://api.example.com/v1/transactions");

        let client = BlackCatClient::new("http://127.0.0.1:9000/", creds()).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9000/v1/transactions");
    }

    #[test]
    fn transaction_ids_are_a_single_path_segment() {
        let client = BlackCatClient::new("https://api.example.com", creds()).unwrap();
        assert_eq!(
            client.transaction_url("tx_1").as_str(),
            "https://api.example.com/v1/transactions/tx_1"
        );
        assert_eq!(
            client.transaction_url("a/b c").as_str(),
            "https://api.example.com/v1/transactions/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            BlackCatClient::new("not a url", creds()),
            Err(GatewayError::InvalidEndpoint(_))
        ));
    }
}
