// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Handles the application settings via a config file and environment variables.
use crate::cli::Args;
use config::ConfigError;
use std::path::Path;
use std::sync::Arc;

pub use controller_shared::settings::*;

/// Reload the settings from the `config_path` & the environment
///
/// Only the notification settings are applied, everything else requires a restart.
pub(crate) fn reload_settings(
    shared_settings: SharedSettings,
    config_path: &Path,
) -> Result<(), ConfigError> {
    let new_settings = Settings::load(config_path)?;
    let mut current_settings = (*shared_settings.load_full()).clone();

    current_settings.notifications = new_settings.notifications;

    // replace the shared settings with the modified ones
    shared_settings.store(Arc::new(current_settings));

    Ok(())
}

/// Loads settings from program arguments and config file
pub fn load_settings(args: &Args) -> Result<Settings, ConfigError> {
    Settings::load(&args.config)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use types::notification::ChannelKind;

    #[test]
    fn example_toml() -> Result<(), ConfigError> {
        Settings::load(Path::new("../../extra/example.toml"))?;
        Ok(())
    }

    #[test]
    fn reload_only_applies_notifications() -> Result<(), ConfigError> {
        let shared = test_util::test_settings();

        reload_settings(shared.clone(), Path::new("../../extra/example.toml"))?;

        let reloaded = shared.load();

        assert_eq!(reloaded.notifications.send_timeout, Duration::from_secs(5));
        assert_eq!(
            reloaded.notifications.welcome_channels,
            vec![ChannelKind::Email, ChannelKind::Sms]
        );
        assert_eq!(reloaded.appwrite.project_id, "eventify-test");

        Ok(())
    }
}
