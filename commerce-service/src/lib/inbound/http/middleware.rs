use auth::Identity;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request gate: verifies bearer tokens and attaches the caller's identity.
///
/// Requests without bearer credentials pass through anonymously; endpoints
/// are public by default and handlers that need an identity reject the
/// request themselves (see [`CurrentUser`]). A presented token that fails
/// verification short-circuits with 401 before any handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned);

    let token = match token {
        Some(token) => token,
        // Missing or non-bearer Authorization header: anonymous pass-through
        None => return Ok(next.run(req).await),
    };

    match state.authenticator.verify_token(&token, Utc::now()) {
        Ok(subject) => {
            req.extensions_mut().insert(Identity::authenticated(subject));
            Ok(next.run(req).await)
        }
        Err(e) => {
            // Malformed/bad-signature/expired stays in the logs; the caller
            // sees one generic rejection
            tracing::warn!(error = %e, "Token verification failed");
            Err(ApiError::Unauthorized("Invalid or expired token".to_string()).into_response())
        }
    }
}

/// Extractor for handlers that require an authenticated caller.
///
/// Reads the [`Identity`] the gate attached to the request; rejects with
/// 401 when the request came through anonymously.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
