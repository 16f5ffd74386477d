// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::response::error::ValidationErrorEntry;
use super::response::{ApiError, Created, CODE_INVALID_VALUE, CODE_VALUE_REQUIRED};
use crate::services::{RsvpAck, RsvpError, RsvpService};
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{get, post};
use serde::{Deserialize, Serialize};
use types::core::EventId;
use types::event::Event;
use types::notification::DispatchReport;
use types::rsvp::{Contact, RsvpResponse, RsvpStatus};
use validator::Validate;

/// Placeholder some clients send when no choice was made
const NO_RESPONSE: &str = "null";

impl From<RsvpError> for ApiError {
    fn from(e: RsvpError) -> Self {
        match e {
            RsvpError::ResponseRequired => ApiError::unprocessable_entities([
                ValidationErrorEntry::new("response", CODE_VALUE_REQUIRED, Some(e.to_string())),
            ])
            .with_code("response_required"),
            RsvpError::EventNotFound => ApiError::not_found()
                .with_code("event_not_found")
                .with_message(e.to_string()),
            RsvpError::Store(e) => {
                log::error!("RSVP store failed, {}", e);
                ApiError::internal()
            }
            RsvpError::ConfirmationNotSent(ack) => {
                log::error!(
                    "Unexpected confirmation error for stored RSVP {}",
                    ack.rsvp.id
                );
                ApiError::internal()
            }
        }
    }
}

/// API Endpoint `GET /events/{event_id}`
///
/// Returns the event resource for the given id
#[get("/events/{event_id}")]
pub async fn get_event(
    rsvp: Data<RsvpService>,
    event_id: Path<EventId>,
) -> Result<Json<Event>, ApiError> {
    let event = rsvp.event(&event_id).await?;

    Ok(Json(event))
}

/// Body of the `POST /events/{event_id}/rsvp` endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct PostRsvpBody {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    email: String,
    #[validate(length(min = 1))]
    phone: String,
    /// `going` or `not-going`
    #[serde(default)]
    response: Option<String>,
}

/// Response body of the `POST /events/{event_id}/rsvp` endpoint
#[derive(Debug, Serialize)]
pub struct PostRsvpResponse {
    rsvp: RsvpResponse,
    /// False if the response was recorded but the confirmation email failed
    confirmation_sent: bool,
    dispatch: DispatchReport,
}

impl PostRsvpResponse {
    fn new(ack: RsvpAck, confirmation_sent: bool) -> Self {
        Self {
            rsvp: ack.rsvp,
            confirmation_sent,
            dispatch: ack.confirmation,
        }
    }
}

/// Parse the submitted choice, an absent choice is `None`
fn parse_response(response: Option<&str>) -> Result<Option<RsvpStatus>, ApiError> {
    match response.map(str::trim) {
        None | Some("") | Some(NO_RESPONSE) => Ok(None),
        Some(response) => response.parse().map(Some).map_err(|_| {
            ApiError::unprocessable_entities([ValidationErrorEntry::new(
                "response",
                CODE_INVALID_VALUE,
                Some("response must be one of going, not-going"),
            )])
        }),
    }
}

/// API Endpoint `POST /events/{event_id}/rsvp`
///
/// Records the response and sends a confirmation email to the submitted address.
/// The response is recorded even if the confirmation fails, in which case
/// `confirmation_sent` is false.
#[post("/events/{event_id}/rsvp")]
pub async fn post_rsvp(
    rsvp: Data<RsvpService>,
    event_id: Path<EventId>,
    body: Json<PostRsvpBody>,
) -> Result<Created<PostRsvpResponse>, ApiError> {
    let body = body.into_inner();
    body.validate()?;

    let response = parse_response(body.response.as_deref())?;

    let contact = Contact {
        name: body.name,
        email: body.email,
        phone: body.phone,
    };

    match rsvp.submit(&event_id, contact, response).await {
        Ok(ack) => Ok(Created(PostRsvpResponse::new(ack, true))),
        Err(RsvpError::ConfirmationNotSent(ack)) => {
            log::warn!("RSVP {} recorded without confirmation", ack.rsvp.id);

            Ok(Created(PostRsvpResponse::new(*ack, false)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Query parameters of the `GET /events/{event_id}/rsvps` endpoint
#[derive(Debug, Deserialize)]
pub struct GetRsvpsQuery {
    /// Only return the effective response of every email address
    #[serde(default)]
    latest: bool,
}

/// API Endpoint `GET /events/{event_id}/rsvps`
///
/// Returns the responses of the event ordered by submission time
#[get("/events/{event_id}/rsvps")]
pub async fn get_rsvps(
    rsvp: Data<RsvpService>,
    event_id: Path<EventId>,
    query: Query<GetRsvpsQuery>,
) -> Result<Json<Vec<RsvpResponse>>, ApiError> {
    let responses = rsvp.responses(&event_id, query.latest).await?;

    Ok(Json(responses))
}
