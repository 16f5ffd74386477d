// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Production implementations of the collaborator interfaces
use anyhow::{Context, Result};
use appwrite_client::AppwriteClient;
use controller_shared::capabilities::{
    ChannelSender, EventDirectory, IdentityDirectory, RsvpStore,
};
use controller_shared::settings::Settings;
use std::sync::Arc;
use types::notification::ChannelKind;

mod appwrite;
mod emailjs;

pub use appwrite::{AppwriteDirectory, AppwriteEvents, AppwriteMessaging, AppwriteRsvpStore};
pub use emailjs::EmailJsSender;

/// The set of collaborators the services are built from
pub struct Collaborators {
    pub directory: Arc<dyn IdentityDirectory>,
    /// Welcome email to registered invitees
    pub email: Arc<dyn ChannelSender>,
    /// Welcome SMS to registered invitees
    pub sms: Arc<dyn ChannelSender>,
    /// RSVP confirmations to plain contacts, confirmations fail when unset
    pub confirmation_email: Option<Arc<dyn ChannelSender>>,
    pub events: Arc<dyn EventDirectory>,
    pub rsvp_store: Arc<dyn RsvpStore>,
}

impl Collaborators {
    /// Create the Appwrite and EmailJS backed collaborators from the settings
    ///
    /// Does not check if any of the providers is reachable.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("eventify-controller/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let appwrite = &settings.appwrite;

        let client = Arc::new(
            AppwriteClient::new(
                http_client.clone(),
                appwrite.endpoint.clone(),
                appwrite.project_id.clone(),
                appwrite.api_key.clone(),
            )
            .context("Invalid appwrite endpoint")?,
        );

        let confirmation_email = match &settings.emailjs {
            Some(emailjs) => {
                Some(Arc::new(EmailJsSender::new(http_client, emailjs.clone()))
                    as Arc<dyn ChannelSender>)
            }
            None => {
                log::warn!("No emailjs section configured, RSVP confirmations cannot be sent");
                None
            }
        };

        Ok(Self {
            directory: Arc::new(AppwriteDirectory::new(client.clone())),
            email: Arc::new(AppwriteMessaging::new(client.clone(), ChannelKind::Email)),
            sms: Arc::new(AppwriteMessaging::new(client.clone(), ChannelKind::Sms)),
            confirmation_email,
            events: Arc::new(AppwriteEvents::new(
                client.clone(),
                appwrite.database_id.clone(),
                appwrite.events_collection_id.clone(),
            )),
            rsvp_store: Arc::new(AppwriteRsvpStore::new(
                client,
                appwrite.database_id.clone(),
                appwrite.rsvp_collection_id.clone(),
            )),
        })
    }
}
