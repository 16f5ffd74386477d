// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Texts of the notifications sent by the controller
use types::event::Event;
use types::invitee::Invitee;
use types::notification::NotificationContent;
use types::rsvp::{Contact, RsvpStatus};

const WELCOME_BODY: &str = "Thank you for signing up!";

/// Long month, zero padded day, four digit year. e.g. `March 07, 2025`
const EVENT_DATE_FORMAT: &str = "%B %d, %Y";

const DATE_NOT_SPECIFIED: &str = "Not specified";
const LOCATION_NOT_SPECIFIED: &str = "TBD";

/// Content of the welcome notification sent after a registration
pub fn welcome(invitee: &Invitee) -> NotificationContent {
    NotificationContent::new(WELCOME_BODY).with_subject(format!("Welcome! {}", invitee.email))
}

/// Content of the confirmation sent after an RSVP was recorded
///
/// Template based senders get the event details as variables, the rendered body
/// is used by everything else.
pub fn rsvp_confirmation(
    event: &Event,
    contact: &Contact,
    response: RsvpStatus,
) -> NotificationContent {
    let event_date = event
        .starts_at
        .map(|starts_at| starts_at.format(EVENT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| DATE_NOT_SPECIFIED.into());

    let event_location = event
        .location
        .clone()
        .filter(|location| !location.trim().is_empty())
        .unwrap_or_else(|| LOCATION_NOT_SPECIFIED.into());

    let response_status = match response {
        RsvpStatus::Going => "Accepted",
        _ => "Declined",
    };

    let body = format!(
        "Hi {name},\n\nyour response to {event} on {date} at {location} was recorded: {status}.",
        name = contact.name,
        event = event.name,
        date = event_date,
        location = event_location,
        status = response_status,
    );

    NotificationContent::new(body)
        .with_subject(format!("RSVP confirmation: {}", event.name))
        .with_variable("to_name", &contact.name)
        .with_variable("to_email", &contact.email)
        .with_variable("event_name", &event.name)
        .with_variable("event_date", event_date)
        .with_variable("event_location", event_location)
        .with_variable("response_status", response_status)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_util::{invitee, sample_event};

    fn contact() -> Contact {
        Contact {
            name: "Ada".into(),
            email: "ada@x.com".into(),
            phone: "+15550001".into(),
        }
    }

    #[test]
    fn welcome_content() {
        let content = welcome(&invitee("1", "a@x.com", "+15550001"));

        assert_eq!(content.subject.as_deref(), Some("Welcome! a@x.com"));
        assert_eq!(content.body, "Thank you for signing up!");
        assert!(content.template_variables.is_empty());
    }

    #[test]
    fn confirmation_variables() {
        let content = rsvp_confirmation(&sample_event(), &contact(), RsvpStatus::Going);

        let variables = &content.template_variables;
        assert_eq!(variables["to_name"], "Ada");
        assert_eq!(variables["to_email"], "ada@x.com");
        assert_eq!(variables["event_name"], "Summer Party");
        assert_eq!(variables["event_date"], "March 07, 2025");
        assert_eq!(variables["event_location"], "Rooftop");
        assert_eq!(variables["response_status"], "Accepted");
        assert_eq!(
            content.subject.as_deref(),
            Some("RSVP confirmation: Summer Party")
        );
        assert!(content.body.contains("Summer Party"));
    }

    #[test]
    fn confirmation_fallbacks() {
        let event = Event {
            location: None,
            starts_at: None,
            ..sample_event()
        };

        let content = rsvp_confirmation(&event, &contact(), RsvpStatus::NotGoing);

        let variables = &content.template_variables;
        assert_eq!(variables["event_date"], "Not specified");
        assert_eq!(variables["event_location"], "TBD");
        assert_eq!(variables["response_status"], "Declined");
    }
}
