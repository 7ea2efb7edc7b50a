use serde_json::Value;

use crate::{
    dto::pix::{CheckStatusRequest, CreatePixRequest, CreatePixResponse, TransactionStatus},
    error::{AppError, AppResult},
    gateway::{
        CreateTransactionRequest, GatewayTransaction,
        types::{Customer, Document, Item, PIX_EXPIRES_IN_SECONDS, PixOptions},
    },
    models::{Metadata, ShippingType, digits_only},
    response::ApiResponse,
    state::AppState,
};

pub const MISSING_CREDENTIALS: &str = "Chaves de API não configuradas";
pub const INVALID_ORDER: &str = "Dados do pedido inválidos";
pub const MISSING_DOCUMENT: &str = "CPF e telefone são obrigatórios";
pub const CREATE_FAILED: &str = "Erro ao criar transação PIX";
pub const CREATE_INTERNAL_ERROR: &str = "Erro interno do servidor";
pub const MISSING_TRANSACTION_ID: &str = "Transaction ID is required";
pub const STATUS_INTERNAL_ERROR: &str = "Erro ao verificar status";

type PixCodeSource = fn(&GatewayTransaction) -> Option<&str>;

/// Places the gateway may put the copy-and-paste PIX code, most specific first.
const PIX_CODE_SOURCES: [PixCodeSource; 5] = [
    nested_qrcode,
    nested_qr_code,
    nested_copy_paste,
    top_level_qr_code,
    top_level_copy_paste,
];

fn nested_qrcode(tx: &GatewayTransaction) -> Option<&str> {
    tx.pix.as_ref()?.qrcode.as_deref()
}

fn nested_qr_code(tx: &GatewayTransaction) -> Option<&str> {
    tx.pix.as_ref()?.qr_code.as_deref()
}

fn nested_copy_paste(tx: &GatewayTransaction) -> Option<&str> {
    tx.pix.as_ref()?.copy_paste.as_deref()
}

fn top_level_qr_code(tx: &GatewayTransaction) -> Option<&str> {
    tx.pix_qr_code.as_deref()
}

fn top_level_copy_paste(tx: &GatewayTransaction) -> Option<&str> {
    tx.pix_copy_paste.as_deref()
}

pub fn resolve_pix_code(tx: &GatewayTransaction) -> Option<String> {
    PIX_CODE_SOURCES
        .iter()
        .filter_map(|source| source(tx))
        .find(|code| !code.is_empty())
        .map(str::to_string)
}

/// Blank complements (missing, `null`, `""`, `false`, `0`) are sent as `""`.
fn complement_or_empty(complement: Option<Value>) -> Value {
    match complement {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::from(""),
        Some(Value::String(s)) if s.is_empty() => Value::from(""),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Value::from(""),
        Some(other) => other,
    }
}

pub fn build_transaction_request(
    payload: CreatePixRequest,
    shipping: ShippingType,
) -> AppResult<CreateTransactionRequest> {
    let (cpf, phone) = match (payload.cpf.as_deref(), payload.phone.as_deref()) {
        (Some(cpf), Some(phone)) => (digits_only(cpf), digits_only(phone)),
        _ => return Err(AppError::Validation(MISSING_DOCUMENT.into())),
    };
    let amount = shipping.amount();

    let mut metadata = Metadata::new();
    metadata.insert("shipping_type", payload.shipping_type);
    let address = payload.address;
    metadata.insert("cep", address.cep);
    metadata.insert("street", address.street);
    metadata.insert("number", address.number);
    metadata.insert("complement", Some(complement_or_empty(address.complement)));
    metadata.insert("neighborhood", address.neighborhood);
    metadata.insert("city", address.city);
    metadata.insert("state", address.state);
    let tracking = payload.tracking;
    metadata.insert("src", tracking.src);
    metadata.insert("sck", tracking.sck);
    metadata.insert("utm_source", tracking.utm_source);
    metadata.insert("utm_campaign", tracking.utm_campaign);
    metadata.insert("utm_medium", tracking.utm_medium);
    metadata.insert("utm_content", tracking.utm_content);
    metadata.insert("utm_term", tracking.utm_term);
    let metadata = metadata.to_json_string().map_err(|e| {
        tracing::error!(error = %e, "failed to encode transaction metadata");
        AppError::Validation(INVALID_ORDER.into())
    })?;

    Ok(CreateTransactionRequest {
        amount,
        currency: "BRL".into(),
        payment_method: "pix".into(),
        customer: Customer {
            name: payload.name,
            email: payload.email,
            document: Document {
                kind: "cpf".into(),
                number: cpf,
            },
            phone,
        },
        items: vec![Item {
            title: "Pedido".into(),
            unit_price: amount,
            quantity: 1,
            tangible: false,
        }],
        pix: PixOptions {
            expires_in_seconds: PIX_EXPIRES_IN_SECONDS,
        },
        metadata,
    })
}

pub async fn create_pix(state: &AppState, payload: CreatePixRequest) -> AppResult<CreatePixResponse> {
    let Some(gateway) = state.gateway.as_ref() else {
        tracing::error!("gateway credentials are not configured");
        return Err(AppError::Configuration(MISSING_CREDENTIALS.into()));
    };

    let shipping = ShippingType::from_flag(payload.shipping_type.as_ref());
    let request = build_transaction_request(payload, shipping)?;
    tracing::info!(
        amount = request.amount,
        shipping_type = shipping.as_str(),
        customer = request.customer.name.as_ref().and_then(serde_json::Value::as_str).unwrap_or("-"),
        "creating pix transaction"
    );

    let tx = gateway.create_transaction(&request).await.map_err(|source| {
        tracing::error!(error = %source, "pix creation failed");
        AppError::Upstream {
            message: CREATE_INTERNAL_ERROR.into(),
            source,
        }
    })?;
    tracing::debug!(?tx, "gateway create response body");

    let pix_code = resolve_pix_code(&tx);
    match tx.id {
        Some(transaction_id) => Ok(CreatePixResponse {
            success: true,
            transaction_id,
            pix_code,
            amount: request.amount,
            status: tx.status,
        }),
        None => {
            let message = tx
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| CREATE_FAILED.into());
            tracing::warn!(%message, "gateway rejected pix transaction");
            Err(AppError::Gateway(message))
        }
    }
}

pub async fn check_status(
    state: &AppState,
    payload: CheckStatusRequest,
) -> AppResult<ApiResponse<TransactionStatus>> {
    let Some(transaction_id) = payload.transaction_id.filter(|id| !id.is_empty()) else {
        return Err(AppError::Validation(MISSING_TRANSACTION_ID.into()));
    };
    let Some(gateway) = state.gateway.as_ref() else {
        tracing::error!(%transaction_id, "status check without gateway credentials");
        return Err(AppError::Configuration(STATUS_INTERNAL_ERROR.into()));
    };

    let tx = gateway
        .get_transaction(&transaction_id)
        .await
        .map_err(|source| {
            tracing::error!(%transaction_id, error = %source, "status check failed");
            AppError::Upstream {
                message: STATUS_INTERNAL_ERROR.into(),
                source,
            }
        })?;
    tracing::debug!(?tx, "gateway status response body");

    Ok(ApiResponse::success(TransactionStatus {
        transaction_id: tx.id,
        status: tx.status,
        paid_at: tx.paid_at,
    }))
}
