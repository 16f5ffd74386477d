// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! This module contains types that are considered to be in the core of Eventify.
//!
//! All core types are simple types (e.g. newtypes of primitive or other simple types),
//! and typically used by other types in this crate.

mod event_id;
mod invitee_id;
mod message_id;
mod rsvp_id;
mod timestamp;

pub use event_id::EventId;
pub use invitee_id::InviteeId;
pub use message_id::MessageId;
pub use rsvp_id::RsvpId;
pub use timestamp::Timestamp;
