// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Invitee records as stored in the identity directory

use crate::core::InviteeId;
use serde::{Deserialize, Serialize};

/// A person registered to receive event notifications
///
/// Created once at registration and never mutated by the controller afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitee {
    /// Directory id, generated at registration
    pub id: InviteeId,
    /// Email address, unique within the directory
    pub email: String,
    /// Phone number in country-code-prefixed E.164 form
    pub phone: String,
}

/// The part of an [`Invitee`] that is handed out after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteeSummary {
    /// Directory id
    pub id: InviteeId,
    /// Email address
    pub email: String,
}

impl From<Invitee> for InviteeSummary {
    fn from(invitee: Invitee) -> Self {
        Self {
            id: invitee.id,
            email: invitee.email,
        }
    }
}
