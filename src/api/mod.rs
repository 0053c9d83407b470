use crate::TOKEN_KEY;
use crate::core::error::ServiceError;
use crate::infrastructure::entities::{TipoUsuario, Usuario};
use crate::infrastructure::token::TokenError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use di::ServiceProvider;
use di_axum::RouterServiceProviderExtensions;
use log::error;
use serde::Serialize;
use uuid::Uuid;

pub mod auth;
pub mod chat;
pub mod inscricoes;
pub mod relatorios;
pub mod usuarios;
pub mod vagas;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// HTTP-mapped failure. Every handler error funnels through this type so
/// clients always receive a `{"error": "..."}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Erro interno no servidor.")
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            ServiceError::Forbidden(message) => Self::new(StatusCode::FORBIDDEN, message),
            ServiceError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message),
            ServiceError::Storage(e) => {
                error!("{e}");
                Self::internal()
            }
            ServiceError::Internal(e) => {
                error!("{e}");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Account resolved from the `Authorization: Bearer <token>` header.
///
/// Only authenticates; ownership checks stay inside each endpoint.
#[derive(Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub tipo: TipoUsuario,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, ApiError> {
        let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
            return Err(ApiError::unauthorized("Token não enviado"));
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("Token inválido"))?;
        let token = value.strip_prefix("Bearer ").unwrap_or(value);

        let key = TOKEN_KEY.get().ok_or_else(ApiError::internal)?;
        let claims = key
            .verify(token, Utc::now())
            .map_err(|_| ApiError::unauthorized("Token inválido"))?;

        Ok(CurrentUser {
            id: claims.id,
            email: claims.email,
            tipo: claims.tipo,
        })
    }
}

/// Issues a credential for the account with the process-wide key.
pub(crate) fn issue_token(usuario: &Usuario) -> Result<String, ApiError> {
    let key = TOKEN_KEY.get().ok_or_else(ApiError::internal)?;
    key.issue(usuario, Utc::now()).map_err(|e| {
        if let TokenError::Signing = e {
            error!("{e}");
        }
        ApiError::internal()
    })
}

#[derive(Serialize, Debug)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        message: "Backend VoluntAí está online!",
    })
}

/// Full application router, shared by `main` and the integration tests.
pub fn app(provider: ServiceProvider) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth::router())
        .nest("/api/vagas", vagas::router())
        .nest("/api/inscricoes", inscricoes::router())
        .nest("/api/chat", chat::router())
        .nest("/api/usuarios", usuarios::router())
        .nest("/api/relatorios", relatorios::router())
        .with_provider(provider)
}
