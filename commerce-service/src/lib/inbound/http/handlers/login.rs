use auth::AuthError;
use auth::Credential;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Verify credentials and issue a bearer token.
///
/// Success is 200 with no body; the token rides in the `Authorization`
/// header of the response. Wrong username and wrong password are not
/// distinguished.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Response, ApiError> {
    let credential = Credential {
        username: body.username,
        password: body.password,
    };

    let token = state
        .authenticator
        .login(&credential)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                tracing::info!(username = %credential.username, "Login rejected");
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Password(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            AuthError::Token(err) => {
                ApiError::InternalServerError(format!("Token issuance failed: {}", err))
            }
            AuthError::Store(err) => {
                ApiError::InternalServerError(format!("Credential lookup failed: {}", err))
            }
        })?;

    let header_value = HeaderValue::try_from(format!("Bearer {}", token))
        .map_err(|e| ApiError::InternalServerError(format!("Invalid token header: {}", e)))?;

    let mut response = StatusCode::OK.into_response();
    response
        .headers_mut()
        .insert(header::AUTHORIZATION, header_value);

    Ok(response)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
