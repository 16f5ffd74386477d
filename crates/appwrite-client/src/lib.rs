// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! HTTP client for the parts of the Appwrite server API used by the controller
//!
//! Covers the Users API (identity directory), the Messaging API (email and SMS
//! providers) and the Databases API (event and RSVP collections).
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

pub mod databases;
pub mod messaging;
pub mod query;
pub mod users;

pub use query::Query;

pub type Result<T, E = Error> = std::result::Result<T, E>;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("{message}")]
    Api {
        status: StatusCode,
        kind: String,
        message: String,
    },
    #[error("given base url is not a base")]
    NotBaseUrl,
}

impl Error {
    /// HTTP status of an error returned by the server
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Reqwest(e) => e.status(),
            Self::NotBaseUrl => None,
        }
    }

    /// Returns true if the server reported a conflict with an existing resource
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    /// Returns true if the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns true if the server could not be reached or failed internally
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Api { status, .. } => status.is_server_error(),
            Self::NotBaseUrl => false,
        }
    }
}

/// Error body of the Appwrite API
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// HTTP client to access the Appwrite server APIs using an API key
pub struct AppwriteClient {
    base_url: Url,
    project_id: String,
    api_key: String,

    client: reqwest::Client,
}

impl std::fmt::Debug for AppwriteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteClient")
            .field("base_url", &self.base_url.as_str())
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl AppwriteClient {
    /// Create a new client from all required configurations
    ///
    /// `base_url` is the API endpoint including the version segment, e.g. `https://cloud.appwrite.io/v1`
    pub fn new(
        client: reqwest::Client,
        base_url: Url,
        project_id: String,
        api_key: String,
    ) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::NotBaseUrl);
        }

        Ok(Self {
            base_url,
            project_id,
            api_key,
            client,
        })
    }

    /// Internal function to send a request built by the given closure with the project credentials attached
    ///
    /// Non-success responses are turned into [`Error::Api`]
    async fn send_authorized(&self, f: impl FnOnce(&Client) -> RequestBuilder) -> Result<Response> {
        let response = f(&self.client)
            .header(PROJECT_HEADER, &self.project_id)
            .header(KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let (kind, message) = match response.json::<ErrorBody>().await {
            Ok(body) => (body.kind, body.message),
            Err(_) => (
                String::new(),
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned(),
            ),
        };

        Err(Error::Api {
            status,
            kind,
            message,
        })
    }

    /// internal url builder
    fn url<I>(&self, path_segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::NotBaseUrl)?
            .pop_if_empty()
            .extend(path_segments);
        Ok(url)
    }
}

/// Encode queries as repeated `queries[]` parameters
fn query_params(queries: &[Query]) -> Vec<(&'static str, String)> {
    queries
        .iter()
        .map(|query| ("queries[]", query.to_string()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client(base: &str) -> AppwriteClient {
        AppwriteClient::new(
            Client::new(),
            Url::parse(base).unwrap(),
            "project".into(),
            "key".into(),
        )
        .unwrap()
    }

    #[test]
    fn url_building() {
        let with_slash = client("https://cloud.appwrite.io/v1/");
        let without_slash = client("https://cloud.appwrite.io/v1");

        assert_eq!(
            with_slash.url(["users"]).unwrap().as_str(),
            "https://cloud.appwrite.io/v1/users"
        );
        assert_eq!(
            without_slash
                .url(["messaging", "messages", "sms"])
                .unwrap()
                .as_str(),
            "https://cloud.appwrite.io/v1/messaging/messages/sms"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        let result = AppwriteClient::new(
            Client::new(),
            Url::parse("mailto:admin@example.org").unwrap(),
            "project".into(),
            "key".into(),
        );

        assert!(matches!(result, Err(Error::NotBaseUrl)));
    }

    #[test]
    fn error_classification() {
        let conflict = Error::Api {
            status: StatusCode::CONFLICT,
            kind: "user_already_exists".into(),
            message: "A user with the same id, email, or phone already exists in this project."
                .into(),
        };

        assert!(conflict.is_conflict());
        assert!(!conflict.is_unavailable());
        assert_eq!(
            conflict.to_string(),
            "A user with the same id, email, or phone already exists in this project."
        );

        let down = Error::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            kind: String::new(),
            message: "Service Unavailable".into(),
        };
        assert!(down.is_unavailable());
    }
}
