// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! In-memory collaborators that record how they were called
use async_trait::async_trait;
use controller_shared::capabilities::{
    ChannelSender, DirectoryError, EventDirectory, IdentityDirectory, RsvpStore, SendError,
    StoreError,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use types::core::{EventId, InviteeId, RsvpId};
use types::event::Event;
use types::invitee::Invitee;
use types::notification::{MessageHandle, OutgoingMessage};
use types::rsvp::{NewRsvpResponse, RsvpResponse};

/// Message Appwrite answers with when a user conflicts with an existing one
pub const DUPLICATE_USER_MESSAGE: &str =
    "A user with the same id, email, or phone already exists in this project.";

/// Identity directory backed by a vector
///
/// Rejects records whose email or phone is already taken, like the real directory.
#[derive(Default)]
pub struct SpyDirectory {
    invitees: Mutex<Vec<Invitee>>,
    failure: Mutex<Option<DirectoryError>>,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl SpyDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a directory that already contains `invitees`
    pub fn with_invitees(invitees: Vec<Invitee>) -> Arc<Self> {
        let directory = Self::default();
        *directory.invitees.lock() = invitees;
        Arc::new(directory)
    }

    /// Make every following call fail with `error`
    pub fn fail_with(&self, error: DirectoryError) {
        *self.failure.lock() = Some(error);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored records
    pub fn invitees(&self) -> Vec<Invitee> {
        self.invitees.lock().clone()
    }

    fn check_failure(&self) -> Result<(), DirectoryError> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl IdentityDirectory for SpyDirectory {
    async fn create(
        &self,
        id: InviteeId,
        email: &str,
        phone: &str,
    ) -> Result<Invitee, DirectoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut invitees = self.invitees.lock();

        if invitees
            .iter()
            .any(|existing| existing.id == id || existing.email == email || existing.phone == phone)
        {
            return Err(DirectoryError::Duplicate(DUPLICATE_USER_MESSAGE.into()));
        }

        let invitee = Invitee {
            id,
            email: email.into(),
            phone: phone.into(),
        };
        invitees.push(invitee.clone());

        Ok(invitee)
    }

    async fn list(&self) -> Result<Vec<Invitee>, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self.invitees())
    }
}

/// Channel sender that records every message handed to it
#[derive(Default)]
pub struct SpySender {
    sent: Mutex<Vec<OutgoingMessage>>,
    send_calls: AtomicUsize,
    failure: Option<SendError>,
    delay: Option<Duration>,
}

impl SpySender {
    /// A sender that accepts every message
    pub fn delivering() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A sender that refuses every message with `error`
    pub fn failing(error: SendError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(error),
            ..Default::default()
        })
    }

    /// A sender that accepts every message after sleeping for `delay`
    pub fn delayed(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    /// Messages the sender accepted
    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChannelSender for SpySender {
    async fn send(&self, message: OutgoingMessage) -> Result<MessageHandle, SendError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let handle = MessageHandle {
            id: message.message_id.to_string(),
        };
        self.sent.lock().push(message);

        Ok(handle)
    }
}

/// Event directory backed by a map
#[derive(Default)]
pub struct MemoryEvents {
    events: HashMap<EventId, Event>,
}

impl MemoryEvents {
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Arc<Self> {
        Arc::new(Self {
            events: events
                .into_iter()
                .map(|event| (event.id.clone(), event))
                .collect(),
        })
    }
}

#[async_trait]
impl EventDirectory for MemoryEvents {
    async fn get_by_id(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
        Ok(self.events.get(id).cloned())
    }
}

/// Append-only RSVP store backed by a vector
#[derive(Default)]
pub struct MemoryRsvpStore {
    responses: Mutex<Vec<RsvpResponse>>,
    failure: Mutex<Option<StoreError>>,
    append_calls: AtomicUsize,
}

impl MemoryRsvpStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every following call fail with `error`
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock() = Some(error);
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of all stored responses
    pub fn responses(&self) -> Vec<RsvpResponse> {
        self.responses.lock().clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RsvpStore for MemoryRsvpStore {
    async fn append(&self, response: NewRsvpResponse) -> Result<RsvpResponse, StoreError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut responses = self.responses.lock();
        let id = RsvpId::from(format!("rsvp-{}", responses.len() + 1));
        let response = RsvpResponse::from_new(id, response);
        responses.push(response.clone());

        Ok(response)
    }

    async fn list_by_event(&self, id: &EventId) -> Result<Vec<RsvpResponse>, StoreError> {
        self.check_failure()?;

        Ok(self
            .responses
            .lock()
            .iter()
            .filter(|response| &response.event_id == id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn directory_rejects_taken_phone() {
        let directory = SpyDirectory::new();

        directory
            .create(InviteeId::generate(), "a@x.com", "+15550001")
            .await
            .unwrap();

        assert_eq!(
            directory
                .create(InviteeId::generate(), "b@x.com", "+15550001")
                .await,
            Err(DirectoryError::Duplicate(DUPLICATE_USER_MESSAGE.into()))
        );
        assert_eq!(directory.create_calls(), 2);
        assert_eq!(directory.invitees().len(), 1);
    }
}
