// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use chrono::{TimeZone, Utc};
use controller_shared::settings::{Settings, SharedSettings};
use types::core::{EventId, InviteeId};
use types::event::Event;
use types::invitee::Invitee;

pub const EVENT_ID: &str = "summer-party";

const BASE_SETTINGS: &str = r#"
[appwrite]
endpoint = "http://localhost/v1"
project_id = "eventify-test"
api_key = "test-key"
"#;

/// Settings with every optional section at its default
pub fn test_settings() -> SharedSettings {
    test_settings_with("")
}

/// Settings with additional TOML sections appended to the defaults
pub fn test_settings_with(extra: &str) -> SharedSettings {
    Settings::from_toml(&format!("{BASE_SETTINGS}\n{extra}"))
        .expect("test settings must be valid")
        .into_shared()
}

/// The event stored under [`EVENT_ID`]
pub fn sample_event() -> Event {
    Event {
        id: EventId::from(EVENT_ID.to_owned()),
        name: "Summer Party".into(),
        location: Some("Rooftop".into()),
        capacity: Some(80),
        starts_at: Some(Utc.with_ymd_and_hms(2025, 3, 7, 18, 0, 0).unwrap().into()),
        ends_at: None,
        description: "Drinks and music".into(),
    }
}

pub fn invitee(id: &str, email: &str, phone: &str) -> Invitee {
    Invitee {
        id: InviteeId::from(id.to_owned()),
        email: email.into(),
        phone: phone.into(),
    }
}
