//! Client-side state: durable storage, the persisted session and the
//! observable auth state built on top of it.

pub mod auth;
pub mod session;
pub mod storage;
