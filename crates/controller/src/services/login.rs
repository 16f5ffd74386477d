// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use controller_shared::capabilities::{DirectoryError, IdentityDirectory};
use std::sync::Arc;
use types::invitee::InviteeSummary;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and phone number are required.")]
    MissingCredentials,
    #[error("Invalid credentials. User not found.")]
    NotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Looks up invitees by their contact fields
///
/// Possession of a matching email and phone pair is treated as proof of
/// identity. There is no secret involved.
#[derive(Clone)]
pub struct LoginService {
    directory: Arc<dyn IdentityDirectory>,
}

impl LoginService {
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Find the invitee whose email and phone both match exactly
    #[tracing::instrument(err, skip_all)]
    pub async fn authenticate(&self, email: &str, phone: &str) -> Result<InviteeSummary, AuthError> {
        if email.is_empty() || phone.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let invitee = self
            .directory
            .find_by_contact(email, phone)
            .await?
            .ok_or(AuthError::NotFound)?;

        log::debug!("Invitee {} logged in", invitee.id);

        Ok(invitee.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_util::{invitee, SpyDirectory};
    use types::core::InviteeId;

    #[tokio::test]
    async fn finds_matching_invitee() {
        let directory = SpyDirectory::with_invitees(vec![
            invitee("1", "a@x.com", "+1555"),
            invitee("2", "b@x.com", "+1666"),
        ]);
        let service = LoginService::new(directory);

        let summary = service.authenticate("b@x.com", "+1666").await.unwrap();

        assert_eq!(summary.id, InviteeId::from("2".to_owned()));
        assert_eq!(summary.email, "b@x.com");
    }

    #[tokio::test]
    async fn both_fields_must_match() {
        let directory = SpyDirectory::with_invitees(vec![invitee("1", "a@x.com", "+1555")]);
        let service = LoginService::new(directory);

        assert!(matches!(
            service.authenticate("a@x.com", "+1666").await,
            Err(AuthError::NotFound)
        ));
        assert!(matches!(
            service.authenticate("A@x.com", "+1555").await,
            Err(AuthError::NotFound)
        ));
    }

    #[tokio::test]
    async fn missing_field_skips_directory() {
        let directory = SpyDirectory::new();
        let service = LoginService::new(directory.clone());

        assert!(matches!(
            service.authenticate("", "+1555").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            service.authenticate("a@x.com", "").await,
            Err(AuthError::MissingCredentials)
        ));
        assert_eq!(directory.list_calls(), 0);
    }

    #[tokio::test]
    async fn directory_failure_is_propagated() {
        let directory = SpyDirectory::new();
        directory.fail_with(DirectoryError::Unavailable("timeout".into()));
        let service = LoginService::new(directory);

        assert!(matches!(
            service.authenticate("a@x.com", "+1555").await,
            Err(AuthError::Directory(DirectoryError::Unavailable(_)))
        ));
    }
}
