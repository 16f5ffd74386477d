// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Events as read from the event management collaborator

use crate::core::{EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// An event invitees can respond to
///
/// Owned by the event management collaborator, the controller only reads it to
/// render notification content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Id of the event
    pub id: EventId,
    /// Display name
    pub name: String,
    /// Free text location
    #[serde(default)]
    pub location: Option<String>,
    /// Maximum number of attendees, unlimited when absent
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Start of the schedule window
    #[serde(default)]
    pub starts_at: Option<Timestamp>,
    /// End of the schedule window
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
    /// Free text description
    #[serde(default)]
    pub description: String,
}
