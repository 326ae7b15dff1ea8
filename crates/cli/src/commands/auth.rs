//! Session commands: login, logout, whoami.

use secrecy::SecretString;

use caphe_core::Email;

use super::{CommandError, client};

/// Log in and persist the 24-hour session.
pub async fn login(email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password = SecretString::from(password.to_owned());

    let client = client()?;
    let session = client.login(&email, &password).await?;

    tracing::info!("Đăng nhập thành công: {}", session.user.username);
    tracing::info!(
        "Phiên hết hạn lúc: {}",
        format_expiry(session.expires_at)
    );
    Ok(())
}

/// Destroy the local session.
pub fn logout() -> Result<(), CommandError> {
    let client = client()?;
    client.logout();
    tracing::info!("Đã đăng xuất.");
    Ok(())
}

/// Show the current session, if any.
pub fn whoami() -> Result<(), CommandError> {
    let client = client()?;
    match client.session_store().get_auth() {
        Some(session) => {
            tracing::info!("Đang đăng nhập: {} ({})", session.user.username, session.user.role);
            tracing::info!("Phiên hết hạn lúc: {}", format_expiry(session.expires_at));
        }
        None => tracing::info!("Chưa đăng nhập."),
    }
    Ok(())
}

fn format_expiry(expires_at_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(expires_at_ms)
        .map_or_else(|| expires_at_ms.to_string(), |dt| dt.to_rfc3339())
}
