// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Services used by the HTTP API
//!
//! Every service gets its collaborators injected, which keeps them free of any
//! provider specific code.
use crate::collaborators::Collaborators;
use controller_shared::settings::SharedSettings;
use std::sync::Arc;
use types::notification::ChannelKind;

mod content;
pub mod dispatch;
pub mod login;
pub mod registration;
pub mod rsvp;
pub mod validation;

pub use dispatch::Dispatcher;
pub use login::{AuthError, LoginService};
pub use registration::{RegisteredInvitee, RegistrationError, RegistrationService};
pub use rsvp::{RsvpAck, RsvpError, RsvpService};
pub use validation::{RawInvitee, ValidationError};

/// All services of the controller, built from one set of collaborators
#[derive(Clone)]
pub struct Services {
    pub registration: Arc<RegistrationService>,
    pub login: Arc<LoginService>,
    pub rsvp: Arc<RsvpService>,
}

impl Services {
    pub fn new(settings: SharedSettings, collaborators: Collaborators) -> Self {
        let Collaborators {
            directory,
            email,
            sms,
            confirmation_email,
            events,
            rsvp_store,
        } = collaborators;

        let welcome_dispatcher = Dispatcher::new(settings.clone())
            .with_sender(ChannelKind::Email, email)
            .with_sender(ChannelKind::Sms, sms);

        let mut confirmation_dispatcher = Dispatcher::new(settings.clone());
        if let Some(confirmation_email) = confirmation_email {
            confirmation_dispatcher =
                confirmation_dispatcher.with_sender(ChannelKind::Email, confirmation_email);
        }

        Self {
            registration: Arc::new(RegistrationService::new(
                settings,
                directory.clone(),
                welcome_dispatcher,
            )),
            login: Arc::new(LoginService::new(directory)),
            rsvp: Arc::new(RsvpService::new(
                events,
                rsvp_store,
                confirmation_dispatcher,
            )),
        }
    }
}
