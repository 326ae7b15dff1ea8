//! Authentication: token normalization and the persisted staff session.

pub mod session;
pub mod token;

pub use session::{AuthSession, SessionPhase, SessionStore, StaffUser};
pub use token::{extract_token, normalize_token};
