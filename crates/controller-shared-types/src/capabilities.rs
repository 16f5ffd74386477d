// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Interfaces of the external collaborators
//!
//! The controller never talks to a provider directly. Every service gets
//! handles to these traits injected when it is constructed.
use async_trait::async_trait;
use types::core::{EventId, InviteeId};
use types::event::Event;
use types::invitee::Invitee;
use types::notification::{MessageHandle, OutgoingMessage};
use types::rsvp::{NewRsvpResponse, RsvpResponse};

/// Errors reported by an [`IdentityDirectory`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// A record with the same id, email or phone already exists
    #[error("{0}")]
    Duplicate(String),
    /// The directory refused the request, e.g. because a field is malformed
    #[error("{0}")]
    Rejected(String),
    /// The directory could not be reached
    #[error("identity directory unavailable: {0}")]
    Unavailable(String),
}

/// Authoritative store of invitee records
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Create a new record. Uniqueness is decided by the directory.
    async fn create(&self, id: InviteeId, email: &str, phone: &str)
        -> Result<Invitee, DirectoryError>;

    /// List all records
    async fn list(&self) -> Result<Vec<Invitee>, DirectoryError>;

    /// Find the record whose email and phone both match exactly
    ///
    /// The default implementation scans the full listing. Directories that can
    /// filter on their side should override it.
    async fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Invitee>, DirectoryError> {
        let invitees = self.list().await?;

        Ok(invitees
            .into_iter()
            .find(|invitee| invitee.email == email && invitee.phone == phone))
    }
}

/// Errors reported by a [`ChannelSender`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The sender cannot address this kind of recipient
    #[error("recipient cannot be addressed by this channel")]
    UnsupportedRecipient,
    /// The provider refused the message
    #[error("provider rejected message: {0}")]
    Rejected(String),
    /// The provider could not be reached
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// The send did not finish within its time budget
    #[error("timed out")]
    TimedOut,
}

/// Transport for a single notification channel
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Hand a rendered message to the provider
    async fn send(&self, message: OutgoingMessage) -> Result<MessageHandle, SendError>;
}

/// Errors reported by the event and RSVP stores
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store refused the request
    #[error("store rejected request: {0}")]
    Rejected(String),
    /// The store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the event management collaborator
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Get an event, `None` if the id does not resolve
    async fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError>;
}

/// Append-only storage of RSVP responses
#[async_trait]
pub trait RsvpStore: Send + Sync {
    /// Append a response
    async fn append(&self, response: NewRsvpResponse) -> Result<RsvpResponse, StoreError>;

    /// List all responses of an event in submission order
    async fn list_by_event(&self, id: &EventId) -> Result<Vec<RsvpResponse>, StoreError>;
}
