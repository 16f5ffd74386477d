// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Notification content, channel messages and delivery reports

use crate::core::{InviteeId, MessageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An independent notification transport
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Email, supports a subject line
    Email,
    /// SMS, body only
    Sms,
}

impl ChannelKind {
    /// Whether the channel renders a subject line
    pub fn supports_subject(self) -> bool {
        matches!(self, Self::Email)
    }
}

/// One logical notification before it is rendered for a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    /// Subject line, ignored by channels without subjects
    pub subject: Option<String>,
    /// Message body
    pub body: String,
    /// Variables for template based providers
    #[serde(default)]
    pub template_variables: BTreeMap<String, String>,
}

impl NotificationContent {
    /// Create content with a body only
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            subject: None,
            body: body.into(),
            template_variables: BTreeMap::new(),
        }
    }

    /// Set the subject line
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add a template variable
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.template_variables.insert(key.into(), value.into());
        self
    }
}

/// The receiver of a notification
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipient {
    /// A registered invitee, addressed through the identity directory
    Invitee {
        /// Directory id of the invitee
        id: InviteeId,
    },
    /// A contact without directory record, addressed directly
    Contact {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },
}

impl Recipient {
    /// Short description for log lines, does not contain the email address
    pub fn log_label(&self) -> String {
        match self {
            Self::Invitee { id } => format!("invitee:{id}"),
            Self::Contact { .. } => "contact".into(),
        }
    }
}

/// A message rendered for a single channel, handed to a channel sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// Fresh id per message
    pub message_id: MessageId,
    /// Subject, `None` for channels without subjects
    pub subject: Option<String>,
    /// Message body
    pub body: String,
    /// Variables for template based providers
    pub template_variables: BTreeMap<String, String>,
    /// Provider topics, always empty for per-invitee notifications
    pub topics: Vec<String>,
    /// Receivers of the message
    pub recipients: Vec<Recipient>,
}

impl OutgoingMessage {
    /// Render `content` for `channel` and tag it with a fresh [`MessageId`]
    pub fn render(channel: ChannelKind, recipient: &Recipient, content: &NotificationContent) -> Self {
        let subject = if channel.supports_subject() {
            content.subject.clone()
        } else {
            None
        };

        Self {
            message_id: MessageId::generate(),
            subject,
            body: content.body.clone(),
            template_variables: content.template_variables.clone(),
            topics: Vec::new(),
            recipients: vec![recipient.clone()],
        }
    }
}

/// Handle to a message accepted by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    /// Provider side id of the message
    pub id: String,
}

/// Outcome of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// The provider accepted the message
    Delivered {
        /// Provider handle
        handle: MessageHandle,
    },
    /// The message could not be sent
    Failed {
        /// Human readable reason
        reason: String,
    },
}

/// A delivery attempt on one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// The channel used
    pub channel: ChannelKind,
    /// Id of the message sent on this channel
    pub message_id: MessageId,
    /// What happened
    pub outcome: DeliveryOutcome,
}

impl DeliveryAttempt {
    /// Returns true if the provider accepted the message
    pub fn is_delivered(&self) -> bool {
        matches!(self.outcome, DeliveryOutcome::Delivered { .. })
    }
}

/// Aggregated per-channel outcomes of one dispatch
///
/// Dispatch is best effort, a report may contain any mix of successes and failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// One entry per requested channel
    pub attempts: Vec<DeliveryAttempt>,
}

impl DispatchReport {
    /// Attempts the provider accepted
    pub fn delivered(&self) -> impl Iterator<Item = &DeliveryAttempt> {
        self.attempts.iter().filter(|a| a.is_delivered())
    }

    /// Attempts that failed
    pub fn failed(&self) -> impl Iterator<Item = &DeliveryAttempt> {
        self.attempts.iter().filter(|a| !a.is_delivered())
    }

    /// Returns true if at least one channel was attempted and all of them succeeded
    pub fn all_delivered(&self) -> bool {
        !self.attempts.is_empty() && self.attempts.iter().all(DeliveryAttempt::is_delivered)
    }

    /// Returns true if at least one attempted channel failed
    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    /// Returns true if any channel succeeded
    pub fn any_delivered(&self) -> bool {
        self.attempts.iter().any(DeliveryAttempt::is_delivered)
    }

    /// Get the attempt of a specific channel
    pub fn attempt(&self, channel: ChannelKind) -> Option<&DeliveryAttempt> {
        self.attempts.iter().find(|a| a.channel == channel)
    }
}
