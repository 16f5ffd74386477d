// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Test utility functions for use with the controller services and its HTTP API
pub use ::serde_json;
pub use pretty_assertions::assert_eq;

pub use fakes::{MemoryEvents, MemoryRsvpStore, SpyDirectory, SpySender};
pub use fixtures::{invitee, sample_event, test_settings, test_settings_with, EVENT_ID};

pub mod fakes;
pub mod fixtures;

/// Helper macro to compare a `[Serialize]` implementor with a JSON literal
///
/// Asserts that the left expression equals the right JSON literal when serialized.
///
/// # Examples
///
/// ```
/// use eventify_test_util::assert_eq_json;
/// use std::collections::BTreeMap;
///
/// let mut variables = BTreeMap::new();
/// variables.insert("to_name", "Ada");
///
/// assert_eq_json!(variables, { "to_name": "Ada" });
/// ```
#[macro_export]
macro_rules! assert_eq_json {
    ($val:expr,$($json:tt)+) => {
        let val: $crate::serde_json::Value = $crate::serde_json::to_value(&$val).expect("Expected value to be serializable");

        $crate::assert_eq!(val, $crate::serde_json::json!($($json)+));
    };
}
