// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! RSVP lifecycle
//!
//! Responses are append-only. Every submission is a new record, the latest record
//! per email address is the effective one.
use super::content;
use super::dispatch::Dispatcher;
use controller_shared::capabilities::{EventDirectory, RsvpStore, StoreError};
use std::sync::Arc;
use types::core::{EventId, Timestamp};
use types::event::Event;
use types::notification::{ChannelKind, DispatchReport, Recipient};
use types::rsvp::{effective_responses, Contact, NewRsvpResponse, RsvpResponse, RsvpStatus};

/// Channels the RSVP confirmation is sent on
const CONFIRMATION_CHANNELS: &[ChannelKind] = &[ChannelKind::Email];

/// Acknowledgement of a recorded RSVP
#[derive(Debug, Clone)]
pub struct RsvpAck {
    pub rsvp: RsvpResponse,
    pub confirmation: DispatchReport,
}

#[derive(Debug, thiserror::Error)]
pub enum RsvpError {
    #[error("A response is required")]
    ResponseRequired,
    #[error("Event not found")]
    EventNotFound,
    /// The response is stored, only the confirmation could not be delivered
    #[error("RSVP was recorded but the confirmation could not be sent")]
    ConfirmationNotSent(Box<RsvpAck>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct RsvpService {
    events: Arc<dyn EventDirectory>,
    store: Arc<dyn RsvpStore>,
    dispatcher: Dispatcher,
}

impl RsvpService {
    pub fn new(
        events: Arc<dyn EventDirectory>,
        store: Arc<dyn RsvpStore>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            events,
            store,
            dispatcher,
        }
    }

    /// Get an event by id
    pub async fn event(&self, event_id: &EventId) -> Result<Event, RsvpError> {
        self.events
            .get_by_id(event_id)
            .await?
            .ok_or(RsvpError::EventNotFound)
    }

    /// Record a response to an event and confirm it by email
    ///
    /// The record is durable once the store accepted it. A failed confirmation is
    /// reported as [`RsvpError::ConfirmationNotSent`], which still carries the stored record.
    #[tracing::instrument(err, skip(self, contact))]
    pub async fn submit(
        &self,
        event_id: &EventId,
        contact: Contact,
        response: Option<RsvpStatus>,
    ) -> Result<RsvpAck, RsvpError> {
        let response = response
            .filter(|response| response.is_decision())
            .ok_or(RsvpError::ResponseRequired)?;

        let event = self.event(event_id).await?;

        let rsvp = self
            .store
            .append(NewRsvpResponse {
                event_id: event.id.clone(),
                contact,
                response,
                created_at: Timestamp::now(),
            })
            .await?;

        log::info!("Recorded RSVP {} for event {}", rsvp.id, event.id);

        let recipient = Recipient::Contact {
            name: rsvp.contact.name.clone(),
            email: rsvp.contact.email.clone(),
        };

        let confirmation = self
            .dispatcher
            .dispatch(
                &recipient,
                &content::rsvp_confirmation(&event, &rsvp.contact, rsvp.response),
                CONFIRMATION_CHANNELS,
            )
            .await;

        let ack = RsvpAck { rsvp, confirmation };

        if ack.confirmation.any_delivered() {
            Ok(ack)
        } else {
            Err(RsvpError::ConfirmationNotSent(Box::new(ack)))
        }
    }

    /// List the responses of an event
    ///
    /// With `latest` set only the effective response of every email address is returned.
    pub async fn responses(
        &self,
        event_id: &EventId,
        latest: bool,
    ) -> Result<Vec<RsvpResponse>, RsvpError> {
        let event = self.event(event_id).await?;

        let responses = self.store.list_by_event(&event.id).await?;

        if latest {
            Ok(effective_responses(responses))
        } else {
            Ok(responses)
        }
    }
}
