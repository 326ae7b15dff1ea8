//! 401 responses are fatal to the session.

use caphe_client::{AuthSession, SessionPhase, StaffUser};
use caphe_core::StaffRole;
use caphe_integration_tests::TestContext;

fn stale_session() -> AuthSession {
    AuthSession::new(
        StaffUser {
            username: "admin@caphe.coffee".to_owned(),
            role: StaffRole::Admin,
        },
        "het-han-roi",
    )
}

#[tokio::test]
async fn any_401_purges_the_session() {
    let ctx = TestContext::new().await;

    // A persisted session whose token the backend no longer accepts.
    assert!(ctx.client.session_store().set_auth(&stale_session()));
    assert!(ctx.client.session_store().get_auth().is_some());

    let err = ctx.client.list_customers().await.expect_err("401 expected");
    assert_eq!(err.status, 401);

    // The session store is empty afterwards.
    assert!(ctx.client.session_store().get_auth().is_none());
}

#[tokio::test]
async fn eviction_publishes_the_anonymous_phase() {
    let ctx = TestContext::new().await;
    let rx = ctx.client.subscribe_session();

    assert!(ctx.client.session_store().set_auth(&stale_session()));
    assert_eq!(*rx.borrow(), SessionPhase::Authenticated);

    let _ = ctx.client.list_orders().await;
    assert_eq!(*rx.borrow(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn concurrent_401s_evict_idempotently() {
    let ctx = TestContext::new().await;
    assert!(ctx.client.session_store().set_auth(&stale_session()));

    // Two in-flight requests both hit 401; both eviction paths must be
    // harmless no-ops against each other.
    let (a, b) = tokio::join!(ctx.client.list_customers(), ctx.client.list_orders());
    assert!(a.is_err());
    assert!(b.is_err());

    assert!(ctx.client.session_store().get_auth().is_none());
    assert_eq!(ctx.client.session_store().phase(), SessionPhase::Anonymous);
}

#[tokio::test]
async fn relogin_after_eviction_restores_access() {
    let ctx = TestContext::new().await;
    assert!(ctx.client.session_store().set_auth(&stale_session()));

    let _ = ctx.client.list_customers().await;
    assert!(ctx.client.session_store().get_auth().is_none());

    ctx.login().await;
    assert!(ctx.client.list_customers().await.is_ok());
}
