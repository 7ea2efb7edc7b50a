use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::pix::{
        AddressFields, CheckStatusRequest, CreatePixRequest, CreatePixResponse, TrackingParams,
        TransactionStatus,
    },
    response::{ApiResponse, ErrorResponse},
    routes::{health, pix},
};

/// Documents the Basic scheme the proxy uses towards the gateway.
struct GatewayAuthAddon;

impl Modify for GatewayAuthAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "gateway_basic_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        pix::create_pix,
        pix::check_status
    ),
    components(
        schemas(
            CreatePixRequest,
            AddressFields,
            TrackingParams,
            CreatePixResponse,
            CheckStatusRequest,
            TransactionStatus,
            ErrorResponse,
            health::HealthData,
            ApiResponse<TransactionStatus>,
            ApiResponse<health::HealthData>
        )
    ),
    modifiers(&GatewayAuthAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Pix", description = "PIX checkout endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
