// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Core library of the *Eventify Controller*
//!
//! Registers invitees, sends their welcome notifications and records RSVP
//! responses to events.
//!
//! # Example
//!
//! ```no_run
//! use eventify_controller_core::Controller;
//! use anyhow::Result;
//!
//! #[actix_web::main]
//! async fn main()  {
//!     eventify_controller_core::try_or_exit(run()).await;
//! }
//!
//! async fn run() -> Result<()> {
//!    if let Some(controller) = Controller::create("Eventify Controller").await? {
//!         controller.run().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::api::v1::response::error::{json_error_handler, plain_json_error_handler};
use crate::collaborators::Collaborators;
use crate::services::Services;
use crate::settings::{Settings, SharedSettings};
use crate::trace::ReducedSpanBuilder;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer, Scope};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::net::Ipv6Addr;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tracing_actix_web::TracingLogger;

#[cfg(not(doc))]
mod api;
#[cfg(doc)]
pub mod api;

mod cli;
pub mod collaborators;
pub mod services;
pub mod settings;
mod trace;

/// Wrapper of the main function. Correctly outputs the error to the logging utility or stderr.
pub async fn try_or_exit<T, F>(f: F) -> T
where
    F: std::future::Future<Output = Result<T>>,
{
    match f.await {
        Ok(ok) => {
            trace::destroy().await;

            ok
        }
        Err(err) => {
            if log::log_enabled!(log::Level::Error) {
                log::error!("Crashed with error: {:?}", err);
            } else {
                eprintln!("Crashed with error: {err:?}");
            }

            trace::destroy().await;

            std::process::exit(-1);
        }
    }
}

/// Controller struct representation containing all fields required to drive the controller
pub struct Controller {
    /// Settings loaded on [Controller::create]
    pub startup_settings: Arc<Settings>,

    /// Cloneable shared settings, reloaded when receiving SIGHUP
    pub shared_settings: SharedSettings,

    /// CLI arguments
    args: cli::Args,

    services: Services,
}

impl Controller {
    /// Tries to create a controller from CLI arguments and then the settings.
    ///
    /// This can return Ok(None) which would indicate that the controller executed a CLI
    /// subprogram (e.g. `--reload`) and must now exit.
    ///
    /// Otherwise it will return itself which can be modified and then run using [`Controller::run`]
    pub async fn create(program_name: &str) -> Result<Option<Self>> {
        let args = cli::parse_args()?;

        // Some args run commands by them self and thus should exit here
        if !args.controller_should_start() {
            return Ok(None);
        }

        let settings = settings::load_settings(&args)
            .with_context(|| format!("Failed to load settings from {:?}", args.config))?;

        trace::init(&settings.logging)?;

        log::info!("Starting {}", program_name);

        let controller = Self::init(settings, args).await?;

        Ok(Some(controller))
    }

    #[tracing::instrument(err, skip(settings, args))]
    async fn init(settings: Settings, args: cli::Args) -> Result<Self> {
        let settings = Arc::new(settings);
        let shared_settings: SharedSettings = Arc::new(ArcSwap::from(settings.clone()));

        let collaborators =
            Collaborators::from_settings(&settings).context("Failed to set up collaborators")?;

        let services = Services::new(shared_settings.clone(), collaborators);

        Ok(Self {
            startup_settings: settings,
            shared_settings,
            args,
            services,
        })
    }

    /// Runs the controller until a fatal error occurred or a shutdown is requested (e.g. SIGTERM).
    pub async fn run(self) -> Result<()> {
        let http_server = {
            let cors = self.startup_settings.http.cors.clone();
            let services = self.services.clone();

            HttpServer::new(move || {
                App::new()
                    .wrap(TracingLogger::<ReducedSpanBuilder>::new())
                    .wrap(setup_cors(&cors))
                    .configure(|cfg| configure(cfg, &services))
            })
        };

        let address = (Ipv6Addr::UNSPECIFIED, self.startup_settings.http.port);

        let http_server = http_server.bind(address).with_context(|| {
            format!("Failed to bind http server to {}:{}", address.0, address.1)
        })?;

        log::info!("Startup finished, listening on port {}", address.1);

        let http_server = http_server.disable_signals().run();
        let http_server_handle = http_server.handle();

        let mut reload_signal =
            signal(SignalKind::hangup()).context("Failed to register SIGHUP signal handler")?;

        actix_rt::spawn(http_server);

        // Wait for either SIGTERM or SIGHUP and handle them accordingly
        loop {
            tokio::select! {
                _ = ctrl_c() => {
                    log::info!("Got termination signal, exiting");
                    break;
                }
                _ = reload_signal.recv() => {
                    log::info!("Got reload signal, reloading");

                    if let Err(e) = settings::reload_settings(self.shared_settings.clone(), &self.args.config) {
                        log::error!("Failed to reload settings, {}", e);
                    }
                }
            }
        }

        // Let in-flight requests and their notification sends finish
        http_server_handle.stop(true).await;

        log::info!("HTTP server stopped, goodbye!");

        Ok(())
    }
}

/// Register the services and all endpoints on an actix app
///
/// `/register` and `/login` are served at the root, everything else below `/v1`.
pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(Data::from(services.registration.clone()))
        .app_data(Data::from(services.login.clone()))
        .app_data(Data::from(services.rsvp.clone()))
        .service(v1_scope())
        .service(root_scope());
}

fn v1_scope() -> Scope {
    web::scope("/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api::v1::events::get_event)
        .service(api::v1::events::post_rsvp)
        .service(api::v1::events::get_rsvps)
}

fn root_scope() -> Scope {
    // empty scope to give the unversioned endpoints their own JSON error format
    web::scope("")
        .app_data(web::JsonConfig::default().error_handler(plain_json_error_handler))
        .service(api::auth::register)
        .service(api::auth::login)
}

fn setup_cors(settings: &settings::HttpCors) -> Cors {
    let mut cors = Cors::default();

    for origin in &settings.allowed_origin {
        cors = cors.allowed_origin(origin)
    }

    cors.allowed_header(header::CONTENT_TYPE)
        .allow_any_method()
}
