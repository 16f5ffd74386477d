// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Collaborators backed by an Appwrite project
//!
//! Users act as the identity directory, the messaging service sends welcome
//! notifications and two database collections hold events and RSVP responses.
use appwrite_client::databases::{Document, UNIQUE_ID};
use appwrite_client::users::User;
use appwrite_client::{AppwriteClient, Query};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use controller_shared::capabilities::{
    ChannelSender, DirectoryError, EventDirectory, IdentityDirectory, RsvpStore, SendError,
    StoreError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use types::core::{EventId, InviteeId, RsvpId, Timestamp};
use types::event::Event;
use types::invitee::Invitee;
use types::notification::{ChannelKind, MessageHandle, OutgoingMessage, Recipient};
use types::rsvp::{Contact, NewRsvpResponse, RsvpResponse, RsvpStatus};

/// Page size used when listing a whole collection
const PAGE_SIZE: u32 = 100;

fn directory_error(e: appwrite_client::Error) -> DirectoryError {
    if e.is_conflict() {
        DirectoryError::Duplicate(e.to_string())
    } else if e.is_unavailable() {
        DirectoryError::Unavailable(e.to_string())
    } else {
        DirectoryError::Rejected(e.to_string())
    }
}

fn send_error(e: appwrite_client::Error) -> SendError {
    if e.is_unavailable() {
        SendError::Unavailable(e.to_string())
    } else {
        SendError::Rejected(e.to_string())
    }
}

fn store_error(e: appwrite_client::Error) -> StoreError {
    if e.is_unavailable() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Rejected(e.to_string())
    }
}

fn to_invitee(user: User) -> Invitee {
    Invitee {
        id: InviteeId::from(user.id),
        email: user.email,
        phone: user.phone,
    }
}

/// Identity directory on top of Appwrite users
pub struct AppwriteDirectory {
    client: Arc<AppwriteClient>,
}

impl AppwriteDirectory {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityDirectory for AppwriteDirectory {
    async fn create(
        &self,
        id: InviteeId,
        email: &str,
        phone: &str,
    ) -> Result<Invitee, DirectoryError> {
        let user = self
            .client
            .create_user(id.inner(), email, phone)
            .await
            .map_err(directory_error)?;

        Ok(to_invitee(user))
    }

    async fn list(&self) -> Result<Vec<Invitee>, DirectoryError> {
        let mut invitees = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .client
                .list_users(&[Query::limit(PAGE_SIZE), Query::offset(offset)])
                .await
                .map_err(directory_error)?;

            let page_len = page.len();
            invitees.extend(page.into_iter().map(to_invitee));

            if page_len < PAGE_SIZE as usize {
                return Ok(invitees);
            }

            offset += PAGE_SIZE;
        }
    }

    async fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Invitee>, DirectoryError> {
        let user = self
            .client
            .find_user_by_contact(email, phone)
            .await
            .map_err(directory_error)?;

        Ok(user.map(to_invitee))
    }
}

/// Sends email or SMS to registered invitees through Appwrite messaging
pub struct AppwriteMessaging {
    client: Arc<AppwriteClient>,
    channel: ChannelKind,
}

impl AppwriteMessaging {
    pub fn new(client: Arc<AppwriteClient>, channel: ChannelKind) -> Self {
        Self { client, channel }
    }
}

#[async_trait]
impl ChannelSender for AppwriteMessaging {
    async fn send(&self, message: OutgoingMessage) -> Result<MessageHandle, SendError> {
        let users = message
            .recipients
            .iter()
            .map(|recipient| match recipient {
                Recipient::Invitee { id } => Ok(id.inner().clone()),
                Recipient::Contact { .. } => Err(SendError::UnsupportedRecipient),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let message_id = message.message_id.to_string();

        let sent = match self.channel {
            ChannelKind::Email => {
                self.client
                    .create_email(
                        &message_id,
                        message.subject.as_deref().unwrap_or_default(),
                        &message.body,
                        &message.topics,
                        &users,
                    )
                    .await
            }
            ChannelKind::Sms => {
                self.client
                    .create_sms(&message_id, &message.body, &message.topics, &users)
                    .await
            }
        }
        .map_err(send_error)?;

        Ok(MessageHandle { id: sent.id })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    name: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    description: Option<String>,
}

/// Read access to the events collection
pub struct AppwriteEvents {
    client: Arc<AppwriteClient>,
    database_id: String,
    collection_id: String,
}

impl AppwriteEvents {
    pub fn new(client: Arc<AppwriteClient>, database_id: String, collection_id: String) -> Self {
        Self {
            client,
            database_id,
            collection_id,
        }
    }
}

#[async_trait]
impl EventDirectory for AppwriteEvents {
    async fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
        let document = self
            .client
            .get_document::<EventDocument>(&self.database_id, &self.collection_id, id.inner())
            .await
            .map_err(store_error)?;

        Ok(document.map(|Document { id, data, .. }| Event {
            id: EventId::from(id),
            name: data.name,
            location: data.location,
            capacity: data.capacity,
            starts_at: data.start_at.map(Timestamp::from),
            ends_at: data.end_at.map(Timestamp::from),
            description: data.description.unwrap_or_default(),
        }))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RsvpDocument {
    event_id: String,
    name: String,
    email: String,
    phone: String,
    response: RsvpStatus,
}

impl From<&NewRsvpResponse> for RsvpDocument {
    fn from(new: &NewRsvpResponse) -> Self {
        Self {
            event_id: new.event_id.inner().clone(),
            name: new.contact.name.clone(),
            email: new.contact.email.clone(),
            phone: new.contact.phone.clone(),
            response: new.response,
        }
    }
}

fn to_rsvp(document: Document<RsvpDocument>, fallback_created_at: Timestamp) -> RsvpResponse {
    let created_at = document
        .created_at
        .as_deref()
        .and_then(|created_at| DateTime::parse_from_rfc3339(created_at).ok())
        .map(|created_at| Timestamp::from(created_at.with_timezone(&Utc)))
        .unwrap_or(fallback_created_at);

    let data = document.data;

    RsvpResponse {
        id: RsvpId::from(document.id),
        event_id: EventId::from(data.event_id),
        contact: Contact {
            name: data.name,
            email: data.email,
            phone: data.phone,
        },
        response: data.response,
        created_at,
    }
}

/// Append-only storage of RSVP responses in a collection
pub struct AppwriteRsvpStore {
    client: Arc<AppwriteClient>,
    database_id: String,
    collection_id: String,
}

impl AppwriteRsvpStore {
    pub fn new(client: Arc<AppwriteClient>, database_id: String, collection_id: String) -> Self {
        Self {
            client,
            database_id,
            collection_id,
        }
    }
}

#[async_trait]
impl RsvpStore for AppwriteRsvpStore {
    async fn append(&self, response: NewRsvpResponse) -> Result<RsvpResponse, StoreError> {
        let document = self
            .client
            .create_document(
                &self.database_id,
                &self.collection_id,
                UNIQUE_ID,
                &RsvpDocument::from(&response),
            )
            .await
            .map_err(store_error)?;

        Ok(to_rsvp(document, response.created_at))
    }

    async fn list_by_event(&self, id: &EventId) -> Result<Vec<RsvpResponse>, StoreError> {
        let mut responses = Vec::new();
        let mut offset = 0;

        loop {
            let page = self
                .client
                .list_documents::<RsvpDocument>(
                    &self.database_id,
                    &self.collection_id,
                    &[
                        Query::equal("eventId", id.inner().as_str()),
                        Query::order_asc("$createdAt"),
                        Query::limit(PAGE_SIZE),
                        Query::offset(offset),
                    ],
                )
                .await
                .map_err(store_error)?;

            let page_len = page.len();
            responses.extend(
                page.into_iter()
                    .map(|document| to_rsvp(document, Timestamp::unix_epoch())),
            );

            if page_len < PAGE_SIZE as usize {
                return Ok(responses);
            }

            offset += PAGE_SIZE;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rsvp_document_layout() {
        let document: Document<RsvpDocument> = serde_json::from_value(serde_json::json!({
            "$id": "64f0",
            "$createdAt": "2025-03-01T10:00:00.000+00:00",
            "eventId": "summer-party",
            "name": "Ada",
            "email": "ada@x.com",
            "phone": "+15550001",
            "response": "not-going"
        }))
        .unwrap();

        let rsvp = to_rsvp(document, Timestamp::unix_epoch());

        assert_eq!(rsvp.id, RsvpId::from("64f0".to_owned()));
        assert_eq!(rsvp.event_id, EventId::from("summer-party".to_owned()));
        assert_eq!(rsvp.response, RsvpStatus::NotGoing);
        assert_eq!(rsvp.created_at.to_rfc3339(), "2025-03-01T10:00:00+00:00");
    }

    #[test]
    fn missing_created_at_uses_fallback() {
        let document = Document {
            id: "64f1".into(),
            created_at: None,
            data: RsvpDocument {
                event_id: "e".into(),
                name: "Ada".into(),
                email: "ada@x.com".into(),
                phone: "+1".into(),
                response: RsvpStatus::Going,
            },
        };

        let fallback = Timestamp::now();

        assert_eq!(to_rsvp(document, fallback).created_at, fallback);
    }
}
