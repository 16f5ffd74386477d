// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Contains the application settings.
//!
//! The application settings are set with a TOML config file. Settings specified in the config file
//! can be overwritten by environment variables. To do so, set an environment variable
//! with the prefix `EVENTIFY_CTRL_` followed by the field names you want to set. Nested fields are separated by two underscores `__`.
//! ```sh
//! EVENTIFY_CTRL_<field>__<field-of-field>...
//! ```
//!
//! # Example
//!
//! set the `appwrite.api_key` field:
//! ```sh
//! EVENTIFY_CTRL_APPWRITE__API_KEY=standard_0123456789abcdef
//! ```
//!
//! So the field 'notifications.send_timeout' would resolve to:
//! ```sh
//! EVENTIFY_CTRL_NOTIFICATIONS__SEND_TIMEOUT=5
//! ```
//!
//! # Note
//!
//! Fields set via environment variables do not affect the underlying config file.
//!
//! # Implementation Details:
//!
//! Setting categories, in which all properties implement a default value, should also implement the [`Default`] trait.
use arc_swap::ArcSwap;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use types::notification::ChannelKind;
use url::Url;

pub type SharedSettings = Arc<ArcSwap<Settings>>;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub logging: Logging,
    pub appwrite: Appwrite,
    #[serde(default)]
    pub notifications: Notifications,
    #[serde(default)]
    pub emailjs: Option<EmailJs>,
}

impl Settings {
    /// Creates a new Settings instance from the provided TOML file.
    /// Specific fields can be set or overwritten with environment variables (See module level docs for more details).
    pub fn load(file_name: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(file_name))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Creates a new Settings instance from a TOML string, without environment overrides.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Wrap the settings so they can be shared and swapped on reload
    pub fn into_shared(self) -> SharedSettings {
        Arc::new(ArcSwap::from_pointee(self))
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("EVENTIFY_CTRL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("http.cors.allowed_origin")
        .with_list_parse_key("logging.default_directives")
        .with_list_parse_key("notifications.welcome_channels")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Http {
    #[serde(default = "default_http_port")]
    pub port: u16,
    #[serde(default)]
    pub cors: HttpCors,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            port: default_http_port(),
            cors: HttpCors::default(),
        }
    }
}

const fn default_http_port() -> u16 {
    11311
}

/// Settings for CORS (Cross Origin Resource Sharing)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpCors {
    #[serde(default)]
    pub allowed_origin: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    #[serde(default = "default_directives")]
    pub default_directives: Vec<String>,

    #[serde(default)]
    pub enable_opentelemetry: bool,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            default_directives: default_directives(),
            enable_opentelemetry: false,
            service_name: default_service_name(),
        }
    }
}

fn default_service_name() -> String {
    "eventify-controller".into()
}

fn default_directives() -> Vec<String> {
    // Disable spamming noninformative traces
    vec![
        "eventify=INFO".into(),
        "rustls=WARN".into(),
        "mio=ERROR".into(),
        "hyper=WARN".into(),
        "reqwest=WARN".into(),
    ]
}

/// Connection to the Appwrite project that hosts the identity directory,
/// the messaging providers and the event/RSVP collections
#[derive(Debug, Clone, Deserialize)]
pub struct Appwrite {
    #[serde(default = "default_appwrite_endpoint")]
    pub endpoint: Url,
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    #[serde(default = "default_events_collection_id")]
    pub events_collection_id: String,
    #[serde(default = "default_rsvp_collection_id")]
    pub rsvp_collection_id: String,
}

fn default_appwrite_endpoint() -> Url {
    Url::parse("https://cloud.appwrite.io/v1").expect("Invalid default appwrite URL")
}

fn default_database_id() -> String {
    "eventify".into()
}

fn default_events_collection_id() -> String {
    "events".into()
}

fn default_rsvp_collection_id() -> String {
    "rsvp_responses".into()
}

/// Notification dispatch settings, reloaded on SIGHUP
#[derive(Debug, Clone, Deserialize)]
pub struct Notifications {
    /// Channels the welcome notification is sent on
    #[serde(default = "default_welcome_channels")]
    pub welcome_channels: Vec<ChannelKind>,
    /// Time budget of a single channel send, in seconds
    #[serde(
        deserialize_with = "duration_from_secs",
        default = "default_send_timeout"
    )]
    pub send_timeout: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            welcome_channels: default_welcome_channels(),
            send_timeout: default_send_timeout(),
        }
    }
}

fn default_welcome_channels() -> Vec<ChannelKind> {
    vec![ChannelKind::Email, ChannelKind::Sms]
}

fn default_send_timeout() -> Duration {
    Duration::from_secs(10)
}

/// EmailJS account used to deliver RSVP confirmations to plain email addresses
#[derive(Debug, Clone, Deserialize)]
pub struct EmailJs {
    #[serde(default = "default_emailjs_url")]
    pub url: Url,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_emailjs_url() -> Url {
    Url::parse("https://api.emailjs.com/api/v1.0/email/send").expect("Invalid default EmailJS URL")
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let duration: u64 = Deserialize::deserialize(deserializer)?;

    Ok(Duration::from_secs(duration))
}
