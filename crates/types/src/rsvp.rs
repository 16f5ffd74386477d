// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! RSVP responses to events

use crate::core::{EventId, RsvpId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The attendance decision of a RSVP
///
/// `Pending` is the implicit state before any decision was made. It can be
/// represented in the wire format but is never accepted as a submission.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RsvpStatus {
    /// The invitee will attend
    Going,
    /// The invitee will not attend
    NotGoing,
    /// No decision yet
    Pending,
}

impl RsvpStatus {
    /// Returns true for an explicit choice (`going` or `not-going`)
    pub fn is_decision(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Contact fields captured by the RSVP form
///
/// These are not resolved to an invitee, the form may be filled by someone
/// without an invitee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Name as entered
    pub name: String,
    /// Email address as entered
    pub email: String,
    /// Phone number as entered
    pub phone: String,
}

/// A RSVP response which is about to be appended to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRsvpResponse {
    /// The event responded to
    pub event_id: EventId,
    /// Contact fields of the responder
    #[serde(flatten)]
    pub contact: Contact,
    /// The decision
    pub response: RsvpStatus,
    /// Time of the submission
    pub created_at: Timestamp,
}

/// A RSVP response as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpResponse {
    /// Id assigned by the store
    pub id: RsvpId,
    /// The event responded to
    pub event_id: EventId,
    /// Contact fields of the responder
    #[serde(flatten)]
    pub contact: Contact,
    /// The decision
    pub response: RsvpStatus,
    /// Time of the submission
    pub created_at: Timestamp,
}

impl RsvpResponse {
    /// Attach a store id to a [`NewRsvpResponse`]
    pub fn from_new(id: RsvpId, new: NewRsvpResponse) -> Self {
        Self {
            id,
            event_id: new.event_id,
            contact: new.contact,
            response: new.response,
            created_at: new.created_at,
        }
    }
}

/// Reduce an append-only list of responses to the latest response per email address
///
/// Resubmissions are appended rather than replacing earlier records, so the
/// effective response of a responder is the one created last. Email addresses are
/// compared case-insensitively. The result is ordered by `created_at`.
pub fn effective_responses(responses: Vec<RsvpResponse>) -> Vec<RsvpResponse> {
    let mut latest: HashMap<String, RsvpResponse> = HashMap::new();

    for response in responses {
        let key = response.contact.email.to_lowercase();

        match latest.get(&key) {
            Some(current) if current.created_at > response.created_at => {}
            _ => {
                let _ = latest.insert(key, response);
            }
        }
    }

    let mut effective: Vec<RsvpResponse> = latest.into_values().collect();
    effective.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    effective
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn response(id: &str, email: &str, status: RsvpStatus, secs: i64) -> RsvpResponse {
        RsvpResponse {
            id: RsvpId::from(id.into()),
            event_id: EventId::from("event".into()),
            contact: Contact {
                name: "Alice".into(),
                email: email.into(),
                phone: "+4912345".into(),
            },
            response: status,
            created_at: Timestamp::from(Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(
            serde_json::to_value(RsvpStatus::NotGoing).unwrap(),
            serde_json::json!("not-going")
        );
        assert_eq!("going".parse::<RsvpStatus>().unwrap(), RsvpStatus::Going);
        assert_eq!(RsvpStatus::Pending.to_string(), "pending");
        assert!(!RsvpStatus::Pending.is_decision());
        assert!(RsvpStatus::Going.is_decision());
    }

    #[test]
    fn latest_response_wins() {
        let responses = vec![
            response("1", "a@example.org", RsvpStatus::Going, 10),
            response("2", "b@example.org", RsvpStatus::Going, 20),
            response("3", "A@example.org", RsvpStatus::NotGoing, 30),
        ];

        let effective = effective_responses(responses);

        let ids: Vec<&str> = effective.iter().map(|r| r.id.inner().as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(effective[1].response, RsvpStatus::NotGoing);
    }
}
