//! Routing helpers shared by both front-ends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `navigate` is the router capability the API client redirects through;
//! `auth` holds the pure route-guard rules built on [`crate::AuthState`].

pub mod auth;
pub mod navigate;
