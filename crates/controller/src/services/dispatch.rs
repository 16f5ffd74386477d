// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Notification dispatcher
//!
//! Fans a notification out to a set of channels and waits for every channel to
//! finish. A failing channel never cancels or fails its siblings, the outcome of
//! each channel is reported back instead.
use controller_shared::capabilities::{ChannelSender, SendError};
use controller_shared::settings::SharedSettings;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use types::notification::{
    ChannelKind, DeliveryAttempt, DeliveryOutcome, DispatchReport, NotificationContent,
    OutgoingMessage, Recipient,
};

const CHANNEL_NOT_CONFIGURED: &str = "channel not configured";

#[derive(Clone)]
pub struct Dispatcher {
    settings: SharedSettings,
    senders: BTreeMap<ChannelKind, Arc<dyn ChannelSender>>,
}

impl Dispatcher {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            settings,
            senders: BTreeMap::new(),
        }
    }

    /// Register the sender used for `channel`, replacing any previous one
    pub fn with_sender(mut self, channel: ChannelKind, sender: Arc<dyn ChannelSender>) -> Self {
        self.senders.insert(channel, sender);
        self
    }

    /// Send `content` to `recipient` on every channel in `channels`
    ///
    /// All sends run concurrently, each bounded by the configured send timeout.
    /// The report holds one attempt per distinct channel in the order they were
    /// requested. This function never fails.
    #[tracing::instrument(level = "debug", skip_all, fields(recipient = %recipient.log_label()))]
    pub async fn dispatch(
        &self,
        recipient: &Recipient,
        content: &NotificationContent,
        channels: &[ChannelKind],
    ) -> DispatchReport {
        let send_timeout = self.settings.load().notifications.send_timeout;

        let mut requested: Vec<ChannelKind> = Vec::with_capacity(channels.len());
        for channel in channels {
            if !requested.contains(channel) {
                requested.push(*channel);
            }
        }

        let attempts = requested
            .into_iter()
            .map(|channel| self.attempt(channel, recipient, content, send_timeout));

        DispatchReport {
            attempts: futures::future::join_all(attempts).await,
        }
    }

    async fn attempt(
        &self,
        channel: ChannelKind,
        recipient: &Recipient,
        content: &NotificationContent,
        send_timeout: Duration,
    ) -> DeliveryAttempt {
        let message = OutgoingMessage::render(channel, recipient, content);
        let message_id = message.message_id;

        let outcome = match self.senders.get(&channel) {
            Some(sender) => match tokio::time::timeout(send_timeout, sender.send(message)).await {
                Ok(Ok(handle)) => DeliveryOutcome::Delivered { handle },
                Ok(Err(e)) => DeliveryOutcome::Failed {
                    reason: e.to_string(),
                },
                Err(_) => DeliveryOutcome::Failed {
                    reason: SendError::TimedOut.to_string(),
                },
            },
            None => DeliveryOutcome::Failed {
                reason: CHANNEL_NOT_CONFIGURED.into(),
            },
        };

        match &outcome {
            DeliveryOutcome::Delivered { handle } => log::info!(
                "Sent {} message {} to {}, provider id {}",
                channel,
                message_id,
                recipient.log_label(),
                handle.id
            ),
            DeliveryOutcome::Failed { reason } => log::warn!(
                "Failed to send {} message {} to {}: {}",
                channel,
                message_id,
                recipient.log_label(),
                reason
            ),
        }

        DeliveryAttempt {
            channel,
            message_id,
            outcome,
        }
    }
}
