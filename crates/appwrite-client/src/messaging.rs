// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::Result;
use crate::AppwriteClient;
use serde::{Deserialize, Serialize};

/// A message accepted by the messaging API
#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateEmail<'s> {
    message_id: &'s str,
    subject: &'s str,
    content: &'s str,
    topics: &'s [String],
    users: &'s [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSms<'s> {
    message_id: &'s str,
    content: &'s str,
    topics: &'s [String],
    users: &'s [String],
}

impl AppwriteClient {
    /// Send an email to the given topics and users
    pub async fn create_email(
        &self,
        message_id: &str,
        subject: &str,
        content: &str,
        topics: &[String],
        users: &[String],
    ) -> Result<Message> {
        let url = self.url(["messaging", "messages", "email"])?;

        let body = CreateEmail {
            message_id,
            subject,
            content,
            topics,
            users,
        };

        let response = self
            .send_authorized(move |c| c.post(url).json(&body))
            .await?;

        Ok(response.json().await?)
    }

    /// Send a SMS to the given topics and users
    pub async fn create_sms(
        &self,
        message_id: &str,
        content: &str,
        topics: &[String],
        users: &[String],
    ) -> Result<Message> {
        let url = self.url(["messaging", "messages", "sms"])?;

        let body = CreateSms {
            message_id,
            content,
            topics,
            users,
        };

        let response = self
            .send_authorized(move |c| c.post(url).json(&body))
            .await?;

        Ok(response.json().await?)
    }
}
