//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Compat;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use expense_tracker::Trace;
use expense_tracker::domain::TRACE_ID_HEADER;
#[cfg(debug_assertions)]
use expense_tracker::doc::ApiDoc;
use expense_tracker::inbound::http::auth::AUTH_TOKEN_HEADER;
use expense_tracker::inbound::http::health::{HealthState, live, ready};
use expense_tracker::inbound::http::state::HttpState;
use expense_tracker::inbound::http::validation::json_error_handler;
use expense_tracker::inbound::http::{accounts, expenses};

use state_builders::build_http_state;

/// Request bodies above this are rejected as `too_large`.
const JSON_LIMIT_BYTES: usize = 64 * 1024;
const CORS_MAX_AGE_SECS: usize = 3600;

/// Credentialed CORS restricted to `origins`; anything else gets no CORS headers.
fn cors(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods(["GET", "POST", "PUT", "DELETE"])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allowed_header(AUTH_TOKEN_HEADER)
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .block_on_origin_mismatch(false)
        .max_age(CORS_MAX_AGE_SECS);
    origins
        .iter()
        .fold(base, |cors, origin| cors.allowed_origin(origin))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error_handler);

    let api = web::scope("/api")
        .configure(accounts::configure)
        .configure(expenses::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .wrap(Trace)
        .wrap(Compat::new(cors(cors_origins)))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and return the running server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let cors_origins = config.cors_origins;

    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            &cors_origins,
        )
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
