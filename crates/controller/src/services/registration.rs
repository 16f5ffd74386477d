// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::content;
use super::dispatch::Dispatcher;
use super::validation::{validate_invitee, RawInvitee, ValidationError};
use controller_shared::capabilities::{DirectoryError, IdentityDirectory};
use controller_shared::settings::SharedSettings;
use std::sync::Arc;
use types::core::InviteeId;
use types::invitee::Invitee;
use types::notification::{DispatchReport, Recipient};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// A successful registration
///
/// The welcome notification is best effort, its report is informational only.
#[derive(Debug, Clone)]
pub struct RegisteredInvitee {
    pub invitee: Invitee,
    pub notifications: DispatchReport,
}

#[derive(Clone)]
pub struct RegistrationService {
    settings: SharedSettings,
    directory: Arc<dyn IdentityDirectory>,
    dispatcher: Dispatcher,
}

impl RegistrationService {
    pub fn new(
        settings: SharedSettings,
        directory: Arc<dyn IdentityDirectory>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            settings,
            directory,
            dispatcher,
        }
    }

    /// Validate, persist and welcome a new invitee
    ///
    /// Nothing is written when validation fails. Once the record exists the
    /// registration is successful, regardless of how many welcome channels fail.
    #[tracing::instrument(err, skip_all)]
    pub async fn register(&self, raw: RawInvitee) -> Result<RegisteredInvitee, RegistrationError> {
        let valid = validate_invitee(raw)?;

        let invitee = self
            .directory
            .create(InviteeId::generate(), valid.email(), valid.phone())
            .await?;

        log::info!("Registered invitee {}", invitee.id);

        let channels = self.settings.load().notifications.welcome_channels.clone();

        let notifications = self
            .dispatcher
            .dispatch(
                &Recipient::Invitee {
                    id: invitee.id.clone(),
                },
                &content::welcome(&invitee),
                &channels,
            )
            .await;

        if notifications.has_failures() {
            log::warn!(
                "Welcome notification for invitee {} was not delivered on every channel ({} of {} failed)",
                invitee.id,
                notifications.failed().count(),
                notifications.attempts.len()
            );
        }

        Ok(RegisteredInvitee {
            invitee,
            notifications,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use controller_shared::capabilities::SendError;
    use pretty_assertions::assert_eq;
    use test_util::fakes::DUPLICATE_USER_MESSAGE;
    use test_util::{test_settings, test_settings_with, SpyDirectory, SpySender};
    use types::notification::ChannelKind;

    fn raw(email: &str, phone: &str) -> RawInvitee {
        RawInvitee {
            email: email.into(),
            phone: phone.into(),
        }
    }

    fn service(
        directory: Arc<SpyDirectory>,
        email: Arc<SpySender>,
        sms: Arc<SpySender>,
    ) -> RegistrationService {
        let settings = test_settings();
        let dispatcher = Dispatcher::new(settings.clone())
            .with_sender(ChannelKind::Email, email)
            .with_sender(ChannelKind::Sms, sms);

        RegistrationService::new(settings, directory, dispatcher)
    }

    #[tokio::test]
    async fn register_creates_and_welcomes() {
        let directory = SpyDirectory::new();
        let email = SpySender::delivering();
        let sms = SpySender::delivering();
        let service = service(directory.clone(), email.clone(), sms.clone());

        let registered = service.register(raw("a@x.com", "+15551234")).await.unwrap();

        assert_eq!(directory.create_calls(), 1);
        assert_eq!(registered.invitee.email, "a@x.com");
        assert_eq!(registered.invitee.phone, "+15551234");
        assert!(!registered.invitee.id.inner().is_empty());
        assert!(registered.notifications.all_delivered());

        let welcome_mail = &email.sent()[0];
        assert_eq!(welcome_mail.subject.as_deref(), Some("Welcome! a@x.com"));
        assert_eq!(
            welcome_mail.recipients,
            vec![Recipient::Invitee {
                id: registered.invitee.id.clone()
            }]
        );
        assert_eq!(sms.sent()[0].body, "Thank you for signing up!");
    }

    #[tokio::test]
    async fn invalid_phone_touches_nothing() {
        let directory = SpyDirectory::new();
        let email = SpySender::delivering();
        let sms = SpySender::delivering();
        let service = service(directory.clone(), email.clone(), sms.clone());

        let result = service.register(raw("a@x.com", "15551234")).await;

        assert!(matches!(
            result,
            Err(RegistrationError::Validation(
                ValidationError::InvalidPhoneFormat
            ))
        ));
        assert_eq!(directory.create_calls(), 0);
        assert_eq!(email.send_calls(), 0);
        assert_eq!(sms.send_calls(), 0);
    }

    #[tokio::test]
    async fn duplicate_sends_nothing() {
        let directory = SpyDirectory::new();
        let email = SpySender::delivering();
        let sms = SpySender::delivering();
        let service = service(directory.clone(), email.clone(), sms.clone());

        service.register(raw("a@x.com", "+15551234")).await.unwrap();
        let result = service.register(raw("a@x.com", "+15559999")).await;

        match result {
            Err(RegistrationError::Directory(e)) => {
                assert_eq!(e.to_string(), DUPLICATE_USER_MESSAGE)
            }
            other => panic!("expected directory error, got {other:?}"),
        }
        assert_eq!(email.send_calls(), 1);
        assert_eq!(sms.send_calls(), 1);
    }

    #[tokio::test]
    async fn failed_notifications_do_not_fail_registration() {
        let directory = SpyDirectory::new();
        let email = SpySender::failing(SendError::Unavailable("smtp down".into()));
        let sms = SpySender::failing(SendError::Rejected("no credit".into()));
        let service = service(directory.clone(), email, sms);

        let registered = service.register(raw("a@x.com", "+15551234")).await.unwrap();

        assert!(!registered.notifications.any_delivered());
        assert_eq!(registered.notifications.attempts.len(), 2);
        assert_eq!(directory.invitees().len(), 1);
    }

    #[tokio::test]
    async fn no_welcome_channels_is_not_a_failure() {
        let directory = SpyDirectory::new();
        let email = SpySender::delivering();
        let sms = SpySender::delivering();
        let settings = test_settings_with("[notifications]\nwelcome_channels = []\n");
        let dispatcher = Dispatcher::new(settings.clone())
            .with_sender(ChannelKind::Email, email.clone())
            .with_sender(ChannelKind::Sms, sms.clone());
        let service = RegistrationService::new(settings, directory.clone(), dispatcher);

        let registered = service.register(raw("a@x.com", "+15551234")).await.unwrap();

        assert!(registered.notifications.attempts.is_empty());
        assert!(!registered.notifications.has_failures());
        assert_eq!(directory.create_calls(), 1);
        assert_eq!(email.send_calls(), 0);
        assert_eq!(sms.send_calls(), 0);
    }
}
