// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Registration and login endpoints
//!
//! These endpoints are served without version prefix. Their request and response
//! bodies are consumed by existing clients and must stay exactly as they are.
use super::v1::response::ApiError;
use crate::services::{
    AuthError, LoginService, RawInvitee, RegistrationError, RegistrationService,
};
use actix_web::http::StatusCode;
use actix_web::post;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};

const REGISTERED_MESSAGE: &str = "User registered successfully.";
const LOGIN_MESSAGE: &str = "Login successful.";
const LOGIN_INTERNAL_ERROR: &str = "Internal Server Error.";

/// Response body of `POST /register`
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    message: &'static str,
}

/// Request body of `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    tel: String,
}

/// Response body of `POST /login`
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    success: bool,
    message: &'static str,
}

impl From<RegistrationError> for ApiError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::Validation(e) => ApiError::plain(StatusCode::BAD_REQUEST, e.to_string()),
            RegistrationError::Directory(e) => {
                log::error!("Failed to create invitee, {}", e);
                ApiError::plain(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredentials => ApiError::plain(StatusCode::BAD_REQUEST, e.to_string()),
            AuthError::NotFound => ApiError::plain(StatusCode::UNAUTHORIZED, e.to_string()),
            AuthError::Directory(e) => {
                log::error!("Failed to look up invitee, {}", e);
                ApiError::plain(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_INTERNAL_ERROR)
            }
        }
    }
}

/// API Endpoint `POST /register`
///
/// Creates a new invitee from `{"email", "tel"}` and sends the welcome notifications.
/// Failed notifications are logged but do not fail the request.
#[post("/register")]
pub async fn register(
    registration: Data<RegistrationService>,
    body: Json<RawInvitee>,
) -> Result<Json<RegisterResponse>, ApiError> {
    registration.register(body.into_inner()).await?;

    Ok(Json(RegisterResponse {
        message: REGISTERED_MESSAGE,
    }))
}

/// API Endpoint `POST /login`
///
/// Succeeds if an invitee with exactly the given email and phone exists.
#[post("/login")]
pub async fn login(
    login: Data<LoginService>,
    body: Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let body = body.into_inner();

    login.authenticate(&body.email, &body.tel).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: LOGIN_MESSAGE,
    }))
}
