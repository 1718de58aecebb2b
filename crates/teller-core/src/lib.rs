//! Shared domain primitives for the Teller console: penalty charge shaping,
//! the staff password policy, and notification link resolution.
//!
//! Everything here is pure and synchronous; fetching the underlying data is
//! the backend client's job.

pub mod charges;
pub mod notifications;
pub mod password;
