//! Job applications and the application-time score snapshot.

pub mod handlers;
