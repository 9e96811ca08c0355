//! Shared helpers for HTTP end-to-end tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use expense_tracker::Trace;
use expense_tracker::domain::ports::FixturePasswordHasher;
use expense_tracker::domain::{AuthService, AuthServicePorts, ExpenseService, TokenTtl};
use expense_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use expense_tracker::inbound::http::validation::json_error_handler;
use expense_tracker::inbound::http::{accounts, expenses};
use expense_tracker::outbound::memory::{
    InMemoryExpenseRepository, InMemorySessionTokenRepository, InMemoryUserRepository,
};

pub fn memory_state() -> HttpState {
    let expenses = Arc::new(ExpenseService::new(
        Arc::new(InMemoryExpenseRepository::default()),
        Arc::new(DefaultClock),
    ));
    let auth = Arc::new(AuthService::new(
        AuthServicePorts {
            users: Arc::new(InMemoryUserRepository::default()),
            tokens: Arc::new(InMemorySessionTokenRepository::default()),
            hasher: Arc::new(FixturePasswordHasher),
            clock: Arc::new(DefaultClock),
        },
        TokenTtl::default(),
    ));
    HttpState::new(HttpStatePorts {
        auth,
        expenses: expenses.clone(),
        expenses_query: expenses,
    })
}

/// The production route table over in-memory adapters.
pub async fn spawn_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .configure(accounts::configure)
                    .configure(expenses::configure),
            ),
    )
    .await
}

/// Minimal client: one request, JSON (or null) back.
pub struct Client<'a, S> {
    app: &'a S,
    token: Option<String>,
}

impl<'a, S, B> Client<'a, S>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    pub fn anonymous(app: &'a S) -> Self {
        Self { app, token: None }
    }

    /// Register `username` and act as that user from then on.
    pub async fn register(app: &'a S, username: &str) -> Self {
        let (status, body) = Self::anonymous(app)
            .post(
                "/api/auth/register",
                json!({"username": username, "password": "hunter22"}),
            )
            .await;
        assert_eq!(status, 200, "register {username}: {body}");
        let token = body["token"].as_str().map(str::to_owned);
        assert!(token.is_some(), "token in {body}");
        Self { app, token }
    }

    /// Log in as an existing user.
    pub async fn login(app: &'a S, username: &str) -> Self {
        let (status, body) = Self::anonymous(app)
            .post(
                "/api/auth/login",
                json!({"username": username, "password": "hunter22"}),
            )
            .await;
        assert_eq!(status, 200, "login {username}: {body}");
        let token = body["token"].as_str().map(str::to_owned);
        Self { app, token }
    }

    async fn send(&self, req: test::TestRequest) -> (u16, Value) {
        let req = match &self.token {
            Some(token) => req.insert_header(("x-auth-token", token.clone())),
            None => req,
        };
        let res = test::call_service(self.app, req.to_request()).await;
        let status = res.status().as_u16();
        let bytes = test::read_body(res).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str) -> (u16, Value) {
        self.send(test::TestRequest::get().uri(uri)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (u16, Value) {
        self.send(test::TestRequest::post().uri(uri).set_json(body))
            .await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (u16, Value) {
        self.send(test::TestRequest::put().uri(uri).set_json(body))
            .await
    }

    pub async fn delete(&self, uri: &str) -> (u16, Value) {
        self.send(test::TestRequest::delete().uri(uri)).await
    }
}
