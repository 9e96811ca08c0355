//! Tests for the authentication service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    FixturePasswordHasher, MockSessionTokenRepository, MockUserRepository,
};
use crate::domain::{ErrorCode, PasswordHash, TokenDigest, Username};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

type Service = AuthService<MockUserRepository, MockSessionTokenRepository, FixturePasswordHasher>;

fn service(users: MockUserRepository, tokens: MockSessionTokenRepository) -> Service {
    AuthService::new(
        AuthServicePorts {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            hasher: Arc::new(FixturePasswordHasher),
            clock: Arc::new(FixtureClock(now())),
        },
        TokenTtl::hours(2),
    )
}

fn accepting_tokens() -> MockSessionTokenRepository {
    let mut tokens = MockSessionTokenRepository::new();
    tokens
        .expect_insert()
        .withf(|record| record.expires_at == now() + Duration::hours(2))
        .times(1)
        .return_once(|_| Ok(()));
    tokens.expect_purge_expired().return_once(|_| Ok(0));
    tokens
}

#[fixture]
fn alice() -> UserAccount {
    UserAccount {
        user: User::new(
            UserId::random(),
            Username::new("alice").expect("valid username"),
            now(),
        ),
        password_hash: PasswordHash::new("fixture$secret1"),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password_and_issues_token() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|account| {
            account.user.username().as_str() == "alice"
                && account.password_hash.as_str() == "fixture$secret1"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let token = service(users, accepting_tokens())
        .register(Registration::try_from_parts("alice", "secret1").expect("valid"))
        .await
        .expect("registration succeeds");

    assert_eq!(token.expose().len(), 64);
}

#[rstest]
#[tokio::test]
async fn register_with_taken_username_conflicts() {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .return_once(|_| Err(UserPersistenceError::duplicate_username("alice")));
    let mut tokens = MockSessionTokenRepository::new();
    tokens.expect_insert().times(0);

    let error = service(users, tokens)
        .register(Registration::try_from_parts("alice", "secret1").expect("valid"))
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn login_with_correct_password_issues_token(alice: UserAccount) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .withf(|name| name == "alice")
        .return_once(move |_| Ok(Some(alice)));

    let result = service(users, accepting_tokens())
        .login(LoginCredentials::try_from_parts("alice", "secret1").expect("valid"))
        .await;

    assert!(result.is_ok());
}

#[rstest]
#[case::wrong_password("alice", "nope", true)]
#[case::unknown_user("mallory", "secret1", false)]
#[tokio::test]
async fn bad_login_is_unauthorized_with_one_message(
    alice: UserAccount,
    #[case] username: &str,
    #[case] password: &str,
    #[case] user_exists: bool,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_username()
        .return_once(move |_| Ok(user_exists.then_some(alice)));
    let mut tokens = MockSessionTokenRepository::new();
    tokens.expect_insert().times(0);

    let error = service(users, tokens)
        .login(LoginCredentials::try_from_parts(username, password).expect("valid"))
        .await
        .expect_err("rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "invalid credentials");
}

#[rstest]
#[case::live(now() + Duration::minutes(1), true)]
#[case::expired(now(), false)]
#[tokio::test]
async fn verify_token_honours_expiry(#[case] expires_at: DateTime<Utc>, #[case] valid: bool) {
    let owner = UserId::random();
    let token = AccessToken::from_presented("abc");
    let record = SessionToken {
        digest: token.digest(),
        user_id: owner.clone(),
        created_at: now() - Duration::hours(1),
        expires_at,
    };
    let mut tokens = MockSessionTokenRepository::new();
    tokens
        .expect_find_by_digest()
        .withf(|digest| *digest == TokenDigest::of("abc"))
        .return_once(move |_| Ok(Some(record)));

    let result = service(MockUserRepository::new(), tokens)
        .verify_token(&token)
        .await;

    match result {
        Ok(user_id) => {
            assert!(valid, "expired token must be rejected");
            assert_eq!(user_id, owner);
        }
        Err(error) => {
            assert!(!valid, "live token must be accepted");
            assert_eq!(error.code(), ErrorCode::Unauthorized);
        }
    }
}

#[rstest]
#[tokio::test]
async fn unknown_token_is_unauthorized() {
    let mut tokens = MockSessionTokenRepository::new();
    tokens.expect_find_by_digest().return_once(|_| Ok(None));

    let error = service(MockUserRepository::new(), tokens)
        .verify_token(&AccessToken::from_presented("forged"))
        .await
        .expect_err("unknown token");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn token_store_outage_is_service_unavailable() {
    let mut tokens = MockSessionTokenRepository::new();
    tokens
        .expect_find_by_digest()
        .return_once(|_| Err(SessionTokenRepositoryError::connection("refused")));

    let error = service(MockUserRepository::new(), tokens)
        .verify_token(&AccessToken::from_presented("abc"))
        .await
        .expect_err("store down");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(!error.message().contains("refused"), "{}", error.message());
}

#[rstest]
#[tokio::test]
async fn current_user_returns_the_profile(alice: UserAccount) {
    let expected = alice.user.clone();
    let id = expected.id().clone();
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(alice.user)));

    let user = service(users, MockSessionTokenRepository::new())
        .current_user(&id)
        .await
        .expect("profile found");

    assert_eq!(user, expected);
}
