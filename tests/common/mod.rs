#![allow(dead_code)]

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use pix_checkout_proxy::{
    gateway::{CreateTransactionRequest, GatewayError, GatewayTransaction, PaymentGateway},
    routes::create_app,
    state::AppState,
};
use serde_json::Value;

pub const LANDING_PAGE: &str = "<html><body>landing</body></html>";

/// In-memory gateway: answers with canned JSON bodies and records every call.
#[derive(Default)]
pub struct FakeGateway {
    create_body: Option<Value>,
    status_body: Option<Value>,
    pub created: Mutex<Vec<CreateTransactionRequest>>,
    pub looked_up: Mutex<Vec<String>>,
}

impl FakeGateway {
    /// `None` bodies behave like a refused connection.
    pub fn new(create_body: Option<Value>, status_body: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            create_body,
            status_body,
            ..Default::default()
        })
    }

    pub fn created(&self) -> Vec<CreateTransactionRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.looked_up.lock().unwrap().clone()
    }
}

/// A real transport error: a connection to a port nothing listens on.
pub async fn refused_connection() -> GatewayError {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = reqwest::Client::new()
        .get(format!("http://{addr}/v1/transactions"))
        .send()
        .await
        .unwrap_err();
    GatewayError::Http(err)
}

async fn answer(body: &Option<Value>) -> Result<GatewayTransaction, GatewayError> {
    match body {
        Some(body) => Ok(serde_json::from_value(body.clone())?),
        None => Err(refused_connection().await),
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<GatewayTransaction, GatewayError> {
        self.created.lock().unwrap().push(request.clone());
        answer(&self.create_body).await
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<GatewayTransaction, GatewayError> {
        self.looked_up.lock().unwrap().push(transaction_id.to_string());
        answer(&self.status_body).await
    }
}

pub fn state_with(gateway: &Arc<FakeGateway>) -> AppState {
    AppState::new(Some(gateway.clone() as Arc<dyn PaymentGateway>))
}

pub fn write_static_pages(dir: &Path) {
    std::fs::write(dir.join("index.html"), LANDING_PAGE).unwrap();
    std::fs::write(dir.join("checkout.html"), "<html><body>checkout</body></html>").unwrap();
}

pub fn app(state: AppState, static_dir: &Path) -> Router {
    create_app(state, static_dir)
}
