//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by `openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::accounts::{CredentialsBody, TokenBody, UserResponseBody};
use crate::inbound::http::auth::AUTH_TOKEN_HEADER;
use crate::inbound::http::expenses::{
    ExpenseRequestBody, ExpenseResponseBody, MessageBody, SummaryResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Registers the bearer token header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTH_TOKEN_HEADER,
                "Token issued by POST /api/auth/register or /api/auth/login. \
                 `Authorization: Bearer <token>` is also accepted.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Expense tracker API",
        description = "Per-user expense records with category summaries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::expenses::list_expenses,
        crate::inbound::http::expenses::create_expense,
        crate::inbound::http::expenses::expense_summary,
        crate::inbound::http::expenses::update_expense,
        crate::inbound::http::expenses::delete_expense,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CredentialsBody,
        TokenBody,
        UserResponseBody,
        ExpenseRequestBody,
        ExpenseResponseBody,
        SummaryResponseBody,
        MessageBody,
    )),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "expenses", description = "Expense records owned by the caller"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
