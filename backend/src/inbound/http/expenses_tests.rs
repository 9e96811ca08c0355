//! Handler tests for the expense routes, run against in-memory adapters.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{ExpenseRepositoryError, MockExpenseRepository};
use crate::inbound::http::test_utils::{memory_state, register_user, state_with_expenses};
use crate::inbound::http::validation::json_error_handler;

async fn app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    app_with(memory_state()).await
}

async fn app_with(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(
                web::scope("/api")
                    .configure(crate::inbound::http::accounts::configure)
                    .configure(configure),
            ),
    )
    .await
}

async fn send<S>(app: &S, req: test::TestRequest, token: Option<&str>) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = match token {
        Some(token) => req.insert_header(("x-auth-token", token.to_owned())),
        None => req,
    };
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

async fn create<S>(app: &S, token: &str, body: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, value) = send(
        app,
        test::TestRequest::post().uri("/api/expenses").set_json(body),
        Some(token),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{value}");
    value
}

fn id_of(expense: &Value) -> String {
    expense["id"].as_str().map(str::to_owned).expect("expense id")
}

#[rstest]
#[actix_web::test]
async fn coffee_is_created_and_summarised() {
    let app = app().await;
    let token = register_user(&app, "alice").await;

    let created = create(
        &app,
        &token,
        json!({"title": "Coffee", "category": "Food & Dining", "amount": 4.5}),
    )
    .await;
    assert_eq!(created["title"], "Coffee");
    assert_eq!(created["category"], "Food & Dining");
    assert_eq!(created["amount"], json!(4.5));
    assert!(created["ownerId"].is_string());
    assert!(created["createdAt"].is_string());

    let (status, summary) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses/summary"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({
            "totalAmount": 4.5,
            "totalExpenses": 1,
            "categoryBreakdown": {"Food & Dining": 4.5}
        })
    );
}

#[rstest]
#[actix_web::test]
async fn summary_groups_by_category() {
    let app = app().await;
    let token = register_user(&app, "alice").await;
    for (category, amount) in [("Travel", 100), ("Travel", 50), ("Other", 25)] {
        create(
            &app,
            &token,
            json!({"title": "Trip", "category": category, "amount": amount}),
        )
        .await;
    }

    let (_, summary) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses/summary"),
        Some(&token),
    )
    .await;
    assert_eq!(summary["totalAmount"], json!(175.0));
    assert_eq!(summary["totalExpenses"], 3);
    assert_eq!(
        summary["categoryBreakdown"],
        json!({"Travel": 150.0, "Other": 25.0})
    );
}

#[rstest]
#[actix_web::test]
async fn empty_summary_is_all_zero() {
    let app = app().await;
    let token = register_user(&app, "alice").await;

    let (status, summary) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses/summary"),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({"totalAmount": 0.0, "totalExpenses": 0, "categoryBreakdown": {}})
    );
}

#[rstest]
#[actix_web::test]
async fn list_is_newest_first_and_scoped_to_caller() {
    let app = app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    for title in ["first", "second"] {
        create(
            &app,
            &alice,
            json!({"title": title, "category": "Other", "amount": 1}),
        )
        .await;
    }
    create(
        &app,
        &bob,
        json!({"title": "bob's", "category": "Other", "amount": 1}),
    )
    .await;

    let (status, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses"),
        Some(&alice),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = listed
        .as_array()
        .map(|items| items.iter().filter_map(|e| e["title"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(titles, ["second", "first"]);
}

#[rstest]
#[case::negative(json!({"title": "x", "category": "Other", "amount": -1}), &["amount"])]
#[case::empty_title(json!({"title": "  ", "category": "Other", "amount": 1}), &["title"])]
#[case::unknown_category(json!({"title": "x", "category": "Snacks", "amount": 1}), &["category"])]
#[case::text_amount(json!({"title": "x", "category": "Other", "amount": "lots"}), &["amount"])]
#[case::everything_missing(json!({}), &["title", "category", "amount"])]
#[actix_web::test]
async fn invalid_bodies_are_rejected_and_not_persisted(
    #[case] body: Value,
    #[case] fields: &[&str],
) {
    let app = app().await;
    let token = register_user(&app, "alice").await;

    let (status, error) = send(
        &app,
        test::TestRequest::post().uri("/api/expenses").set_json(body),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    let reported: Vec<&str> = error["details"]["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(reported, fields);

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses"),
        Some(&token),
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_validation_envelope() {
    let app = app().await;
    let token = register_user(&app, "alice").await;

    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/expenses")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"title\": "),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["errors"][0]["field"], "body");
}

#[rstest]
#[actix_web::test]
async fn owner_can_update_and_delete() {
    let app = app().await;
    let token = register_user(&app, "alice").await;
    let created = create(
        &app,
        &token,
        json!({"title": "Coffee", "category": "Food & Dining", "amount": 4.5}),
    )
    .await;
    let uri = format!("/api/expenses/{}", id_of(&created));

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"title": "Tea", "category": "Food & Dining", "amount": "3.20"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Tea");
    assert_eq!(updated["amount"], json!(3.2));
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, removed) = send(&app, test::TestRequest::delete().uri(&uri), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!({"msg": "Expense removed"}));

    let (status, _) = send(&app, test::TestRequest::delete().uri(&uri), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn other_users_cannot_touch_an_expense() {
    let app = app().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let created = create(
        &app,
        &alice,
        json!({"title": "Coffee", "category": "Food & Dining", "amount": 4.5}),
    )
    .await;
    let uri = format!("/api/expenses/{}", id_of(&created));

    let (status, error) = send(&app, test::TestRequest::delete().uri(&uri), Some(&bob)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "forbidden");

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"title": "Mine", "category": "Other", "amount": 1})),
        Some(&bob),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, listed) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses"),
        Some(&alice),
    )
    .await;
    assert_eq!(listed, json!([created]));
}

#[rstest]
#[case::unknown_id("/api/expenses/3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case::malformed_id("/api/expenses/not-an-id")]
#[actix_web::test]
async fn missing_expenses_are_not_found(#[case] uri: &str) {
    let app = app().await;
    let token = register_user(&app, "alice").await;

    let (status, error) = send(&app, test::TestRequest::delete().uri(uri), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(uri)
            .set_json(json!({"title": "x", "category": "Other", "amount": 1})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case::no_token(None)]
#[case::unknown_token(Some("deadbeef"))]
#[actix_web::test]
async fn expense_routes_require_a_valid_token(#[case] token: Option<&str>) {
    let app = app().await;

    let (status, error) = send(&app, test::TestRequest::get().uri("/api/expenses"), token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "unauthorized");
}

#[actix_web::test]
async fn store_outage_is_reported_without_driver_detail() {
    let mut repo = MockExpenseRepository::new();
    repo.expect_list_by_owner().times(1).return_once(|_, _| {
        Err(ExpenseRepositoryError::connection(
            "error connecting to server at db.internal:5432 user=expenses_admin",
        ))
    });
    let app = app_with(state_with_expenses(repo)).await;
    let token = register_user(&app, "alice").await;

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/expenses"),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
    assert_eq!(body["message"], "Service temporarily unavailable");
    let rendered = body.to_string();
    assert!(!rendered.contains("db.internal"), "{rendered}");
    assert!(!rendered.contains("expenses_admin"), "{rendered}");
}
