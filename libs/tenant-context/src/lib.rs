//! Tenant Context
//!
//! Request-scoped tenant identity for multi-tenant APIs. The upstream gateway
//! authenticates the caller and forwards the resolved tenant on the
//! `x-tenant-id` header; this crate extracts it once at the API boundary so
//! that every service call receives the tenant as an explicit parameter
//! instead of reading ambient state.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// Header carrying the trusted tenant identifier.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant identifier extracted from the request.
///
/// Extraction rejects the request when the header is absent or not a UUID;
/// handlers that take a `TenantId` can therefore rely on it being present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Wrap an already-resolved tenant id (used by tests and in-process calls).
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<TenantId> for Uuid {
    fn from(tenant: TenantId) -> Self {
        tenant.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Rejection produced when the tenant header is missing or malformed.
#[derive(Debug)]
pub struct TenantRejection {
    detail: String,
}

impl TenantRejection {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl IntoResponse for TenantRejection {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = Json(serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", status.as_u16()),
            "title": "Missing Tenant",
            "status": status.as_u16(),
            "detail": self.detail,
        }));
        (status, body).into_response()
    }
}

impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = TenantRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(TENANT_HEADER)
            .ok_or_else(|| TenantRejection::new(format!("missing {} header", TENANT_HEADER)))?;

        let raw = value
            .to_str()
            .map_err(|_| TenantRejection::new(format!("{} header is not valid UTF-8", TENANT_HEADER)))?;

        let id = Uuid::parse_str(raw).map_err(|_| {
            TenantRejection::new(format!("{} header is not a valid UUID", TENANT_HEADER))
        })?;

        Ok(TenantId(id))
    }
}
