// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use actix_web::http::StatusCode;
use actix_web::{test, App};
use controller_shared::capabilities::{DirectoryError, SendError, StoreError};
use eventify_controller_core::collaborators::Collaborators;
use eventify_controller_core::configure;
use eventify_controller_core::services::Services;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use test_util::{
    invitee, sample_event, test_settings, MemoryEvents, MemoryRsvpStore, SpyDirectory, SpySender,
    EVENT_ID,
};
use types::rsvp::RsvpStatus;

struct Fixture {
    directory: Arc<SpyDirectory>,
    email: Arc<SpySender>,
    sms: Arc<SpySender>,
    confirmation_email: Arc<SpySender>,
    rsvp_store: Arc<MemoryRsvpStore>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            directory: SpyDirectory::new(),
            email: SpySender::delivering(),
            sms: SpySender::delivering(),
            confirmation_email: SpySender::delivering(),
            rsvp_store: MemoryRsvpStore::new(),
        }
    }

    fn services(&self) -> Services {
        Services::new(
            test_settings(),
            Collaborators {
                directory: self.directory.clone(),
                email: self.email.clone(),
                sms: self.sms.clone(),
                confirmation_email: Some(self.confirmation_email.clone()),
                events: MemoryEvents::with_events([sample_event()]),
                rsvp_store: self.rsvp_store.clone(),
            },
        )
    }
}

macro_rules! app {
    ($fixture:expr) => {{
        let services = $fixture.services();
        test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await
    }};
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let request = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let response = test::call_service(&$app, request).await;
        let status = response.status();
        let body: Value = test::read_body_json(response).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn register_success() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/register",
        json!({ "email": "a@b.com", "tel": "+15551234567" })
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User registered successfully." }));
    assert_eq!(fixture.directory.create_calls(), 1);
    assert_eq!(fixture.directory.invitees().len(), 1);
    assert_eq!(fixture.email.send_calls(), 1);
    assert_eq!(fixture.sms.send_calls(), 1);
}

#[actix_web::test]
async fn register_invalid_phone() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/register",
        json!({ "email": "a@x.com", "tel": "15551234" })
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Phone number must start with a \"+\" and include the country code." })
    );
    assert_eq!(fixture.directory.create_calls(), 0);
    assert_eq!(fixture.email.send_calls(), 0);
    assert_eq!(fixture.sms.send_calls(), 0);
}

#[actix_web::test]
async fn register_missing_email() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(app, "/register", json!({ "tel": "+15551234" }));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email is required." }));
    assert_eq!(fixture.directory.create_calls(), 0);
}

#[actix_web::test]
async fn register_survives_failed_notifications() {
    let fixture = Fixture {
        email: SpySender::failing(SendError::Unavailable("smtp down".into())),
        sms: SpySender::failing(SendError::Rejected("invalid number".into())),
        ..Fixture::new()
    };
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/register",
        json!({ "email": "a@x.com", "tel": "+15551234" })
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User registered successfully." }));
    assert_eq!(fixture.directory.invitees().len(), 1);
}

#[actix_web::test]
async fn register_duplicate() {
    let fixture = Fixture {
        directory: SpyDirectory::with_invitees(vec![invitee("1", "a@x.com", "+15551234")]),
        ..Fixture::new()
    };
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/register",
        json!({ "email": "a@x.com", "tel": "+15551234" })
    );

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "A user with the same id, email, or phone already exists in this project." })
    );
    assert_eq!(fixture.email.send_calls(), 0);
    assert_eq!(fixture.sms.send_calls(), 0);
}

#[actix_web::test]
async fn register_malformed_json() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let request = test::TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn login_success() {
    let fixture = Fixture {
        directory: SpyDirectory::with_invitees(vec![invitee("1", "a@x.com", "+15551234")]),
        ..Fixture::new()
    };
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/login",
        json!({ "email": "a@x.com", "tel": "+15551234" })
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Login successful." }));
}

#[actix_web::test]
async fn login_unknown() {
    let fixture = Fixture {
        directory: SpyDirectory::with_invitees(vec![invitee("1", "a@x.com", "+15551234")]),
        ..Fixture::new()
    };
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/login",
        json!({ "email": "a@x.com", "tel": "+15559999" })
    );

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid credentials. User not found." }));
}

#[actix_web::test]
async fn login_missing_field() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(app, "/login", json!({ "email": "a@x.com" }));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Email and phone number are required." }));
    assert_eq!(fixture.directory.list_calls(), 0);
}

#[actix_web::test]
async fn login_directory_failure() {
    let fixture = Fixture::new();
    fixture
        .directory
        .fail_with(DirectoryError::Unavailable("connection refused".into()));
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/login",
        json!({ "email": "a@x.com", "tel": "+15551234" })
    );

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error." }));
}

#[actix_web::test]
async fn get_event() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let request = test::TestRequest::get()
        .uri(&format!("/v1/events/{EVENT_ID}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["name"], "Summer Party");
    assert_eq!(body["location"], "Rooftop");

    let request = test::TestRequest::get()
        .uri("/v1/events/unknown")
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn rsvp_success() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        &format!("/v1/events/{EVENT_ID}/rsvp"),
        json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": "going" })
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["confirmation_sent"], true);
    assert_eq!(body["rsvp"]["response"], "going");
    assert_eq!(body["rsvp"]["email"], "ada@x.com");
    assert_eq!(body["dispatch"]["attempts"][0]["channel"], "email");
    assert_eq!(fixture.rsvp_store.responses().len(), 1);

    let confirmation = &fixture.confirmation_email.sent()[0];
    assert_eq!(confirmation.template_variables["event_name"], "Summer Party");
    assert_eq!(confirmation.template_variables["event_date"], "March 07, 2025");

    // Welcome senders are not used for confirmations
    assert_eq!(fixture.email.send_calls(), 0);
}

#[actix_web::test]
async fn rsvp_without_response() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    for response in [json!(null), json!("null")] {
        let (status, body) = post_json!(
            app,
            &format!("/v1/events/{EVENT_ID}/rsvp"),
            json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": response })
        );

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "response_required");
    }

    assert_eq!(fixture.rsvp_store.append_calls(), 0);
    assert_eq!(fixture.confirmation_email.send_calls(), 0);
}

#[actix_web::test]
async fn rsvp_missing_contact_fields() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        &format!("/v1/events/{EVENT_ID}/rsvp"),
        json!({ "name": "", "email": "ada@x.com", "phone": "+15550001", "response": "going" })
    );

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_failed");
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(fixture.rsvp_store.append_calls(), 0);
}

#[actix_web::test]
async fn rsvp_unknown_event() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        "/v1/events/unknown/rsvp",
        json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": "going" })
    );

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "event_not_found");
    assert_eq!(fixture.rsvp_store.append_calls(), 0);
}

#[actix_web::test]
async fn rsvp_recorded_when_confirmation_fails() {
    let fixture = Fixture {
        confirmation_email: SpySender::failing(SendError::Unavailable("down".into())),
        ..Fixture::new()
    };
    let app = app!(fixture);

    let (status, body) = post_json!(
        app,
        &format!("/v1/events/{EVENT_ID}/rsvp"),
        json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": "not-going" })
    );

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["confirmation_sent"], false);
    assert_eq!(body["dispatch"]["attempts"][0]["outcome"]["status"], "failed");

    let stored = fixture.rsvp_store.responses();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].response, RsvpStatus::NotGoing);
}

#[actix_web::test]
async fn rsvp_store_failure() {
    let fixture = Fixture::new();
    fixture
        .rsvp_store
        .fail_with(StoreError::Unavailable("offline".into()));
    let app = app!(fixture);

    let (status, _) = post_json!(
        app,
        &format!("/v1/events/{EVENT_ID}/rsvp"),
        json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": "going" })
    );

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(fixture.confirmation_email.send_calls(), 0);
}

#[actix_web::test]
async fn rsvp_listing() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    for response in ["going", "not-going"] {
        let (status, _) = post_json!(
            app,
            &format!("/v1/events/{EVENT_ID}/rsvp"),
            json!({ "name": "Ada", "email": "ada@x.com", "phone": "+15550001", "response": response })
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let request = test::TestRequest::get()
        .uri(&format!("/v1/events/{EVENT_ID}/rsvps"))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let request = test::TestRequest::get()
        .uri(&format!("/v1/events/{EVENT_ID}/rsvps?latest=true"))
        .to_request();
    let latest: Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(latest.as_array().map(Vec::len), Some(1));
    assert_eq!(latest[0]["response"], "not-going");
}
