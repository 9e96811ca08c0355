//! Helpers shared by the handler tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use mockable::DefaultClock;
use serde_json::{Value, json};

use crate::domain::ports::{ExpenseRepository, FixturePasswordHasher};
use crate::domain::{AuthService, AuthServicePorts, ExpenseService, TokenTtl};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    InMemoryExpenseRepository, InMemorySessionTokenRepository, InMemoryUserRepository,
};

/// Password used by [`register_user`].
pub const TEST_PASSWORD: &str = "hunter22";

/// Real services over in-memory adapters; hashing is the reversible fixture.
pub fn memory_state() -> HttpState {
    state_with_expenses(InMemoryExpenseRepository::default())
}

/// As [`memory_state`], with `repo` backing the expense service.
pub fn state_with_expenses<R>(repo: R) -> HttpState
where
    R: ExpenseRepository + 'static,
{
    let expenses = Arc::new(ExpenseService::new(Arc::new(repo), Arc::new(DefaultClock)));
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

pub async fn json_body<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    test::read_body_json(res).await
}

/// Register `username` and return its token.
pub async fn register_user<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({"username": username, "password": TEST_PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "registration of {username}");
    json_body(res).await["token"]
        .as_str()
        .map(str::to_owned)
        .expect("token in registration response")
}
