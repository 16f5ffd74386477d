// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Acceptance checks for invitee input
//!
//! Validation is pure. It never talks to a collaborator and only decides if the
//! raw input may reach the identity directory.
use serde::Deserialize;

/// Country-code marker every accepted phone number starts with
const PHONE_PREFIX: char = '+';

/// Invitee fields exactly as they arrived from the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawInvitee {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "tel")]
    pub phone: String,
}

/// Invitee fields that passed [`validate_invitee`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvitee {
    email: String,
    phone: String,
}

impl ValidInvitee {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Phone number must start with a \"+\" and include the country code.")]
    InvalidPhoneFormat,
    #[error("Email is required.")]
    MissingEmail,
}

/// Check the raw input in a fixed order, phone first
pub fn validate_invitee(raw: RawInvitee) -> Result<ValidInvitee, ValidationError> {
    if !raw.phone.starts_with(PHONE_PREFIX) {
        return Err(ValidationError::InvalidPhoneFormat);
    }

    if raw.email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    Ok(ValidInvitee {
        email: raw.email,
        phone: raw.phone,
    })
}
