// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Template email sender using the EmailJS REST API
//!
//! Used for RSVP confirmations, whose recipients are plain contacts without a
//! directory record.
use async_trait::async_trait;
use controller_shared::capabilities::{ChannelSender, SendError};
use controller_shared::settings::EmailJs;
use serde::Serialize;
use std::collections::BTreeMap;
use types::notification::{MessageHandle, OutgoingMessage, Recipient};

#[derive(Serialize)]
struct SendRequest<'s> {
    service_id: &'s str,
    template_id: &'s str,
    user_id: &'s str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'s str>,
    template_params: BTreeMap<String, String>,
}

/// Build the template parameters for a single contact
///
/// Rendered subject and body are passed along as `subject` and `message`, template
/// variables of the message take precedence over them.
fn template_params(message: &OutgoingMessage, name: &str, email: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();

    if let Some(subject) = &message.subject {
        params.insert("subject".to_owned(), subject.clone());
    }
    params.insert("message".to_owned(), message.body.clone());
    params.insert("to_name".to_owned(), name.to_owned());
    params.insert("to_email".to_owned(), email.to_owned());

    params.extend(
        message
            .template_variables
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    params
}

pub struct EmailJsSender {
    client: reqwest::Client,
    settings: EmailJs,
}

impl EmailJsSender {
    pub fn new(client: reqwest::Client, settings: EmailJs) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl ChannelSender for EmailJsSender {
    async fn send(&self, message: OutgoingMessage) -> Result<MessageHandle, SendError> {
        let (name, email) = match message.recipients.as_slice() {
            [Recipient::Contact { name, email }] => (name, email),
            _ => return Err(SendError::UnsupportedRecipient),
        };

        let request = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            access_token: self.settings.access_token.as_deref(),
            template_params: template_params(&message, name, email),
        };

        let response = self
            .client
            .post(self.settings.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SendError::Unavailable(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            return Ok(MessageHandle {
                id: message.message_id.to_string(),
            });
        }

        let text = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            Err(SendError::Unavailable(format!("{status}: {text}")))
        } else {
            Err(SendError::Rejected(format!("{status}: {text}")))
        }
    }
}
