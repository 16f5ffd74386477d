// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! REST API v1
//!
//! Current Endpoints. See their respective function:
//! - `/events/{event_id}` ([GET](events::get_event))
//! - `/events/{event_id}/rsvp` ([POST](events::post_rsvp))
//! - `/events/{event_id}/rsvps` ([GET](events::get_rsvps))

pub mod events;
pub mod response;
