//! Admin gate
//!
//! A single shared secret unlocks an expiring [`SessionRecord`]. The engine
//! never sees sessions; the admin view checks [`AdminSession`] on entry.

mod gate;
mod session;

pub use gate::{AdminSession, AuthError, SharedSecretGate};
pub use session::{SessionRecord, SessionStore};
