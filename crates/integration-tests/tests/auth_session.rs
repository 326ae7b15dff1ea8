//! Login and session persistence, end to end.

use caphe_client::SessionPhase;
use caphe_integration_tests::{STAFF_EMAIL, TEST_TOKEN, TestContext};
use secrecy::SecretString;

use caphe_core::Email;

#[tokio::test]
async fn login_stores_bare_token_and_authorizes_requests() {
    let ctx = TestContext::new().await;

    // The wire carries `"abc123"` (quoted); the stored token must be bare.
    let session = ctx.login().await;
    assert_eq!(session.token, TEST_TOKEN);
    assert_eq!(session.user.username, STAFF_EMAIL);

    let stored = ctx
        .client
        .session_store()
        .get_auth()
        .expect("session persisted");
    assert_eq!(stored.token, TEST_TOKEN);

    // The mock only accepts exactly `Bearer abc123`, so a successful list
    // proves the Authorization header was normalized correctly.
    let customers = ctx.client.list_customers().await.expect("authorized list");
    assert_eq!(customers.len(), 2);
}

#[tokio::test]
async fn login_with_wrong_password_fails_and_stores_nothing() {
    let ctx = TestContext::new().await;

    let email = Email::parse(STAFF_EMAIL).expect("valid email");
    let err = ctx
        .client
        .login(&email, &SecretString::from("sai-mat-khau"))
        .await
        .expect_err("login must fail");

    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Tên đăng nhập hoặc mật khẩu không đúng.");
    assert!(ctx.client.session_store().get_auth().is_none());
}

#[tokio::test]
async fn session_expires_after_its_ttl() {
    let ctx = TestContext::new().await;
    let session = ctx.login().await;

    // Re-persist the same session with a 1-second TTL and step past it.
    let store = ctx.client.session_store();
    assert!(store.set_auth_with_ttl(&session, 1.0 / 3600.0));
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    assert!(store.get_auth().is_none());
    assert_eq!(store.phase(), SessionPhase::Anonymous);

    // The next request goes out unauthenticated and is rejected.
    let err = ctx
        .client
        .list_customers()
        .await
        .expect_err("unauthenticated list");
    assert_eq!(err.status, 401);
}

#[tokio::test]
async fn unauthenticated_requests_proceed_without_header() {
    let ctx = TestContext::new().await;

    // No session at all: the request is issued (no client-side failure)
    // and the backend's 401 comes back normalized.
    let err = ctx.client.list_customers().await.expect_err("401 expected");
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Phiên đăng nhập đã hết hạn");
}
