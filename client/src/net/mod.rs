//! Networking modules for the marketplace REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the request pipeline and the 401 reaction, `transport` is the
//! HTTP seam, `types` and `query` define the wire shapes, and `web`/`admin`
//! hold the per-application endpoint wrappers.

pub mod admin;
pub mod api;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;
pub mod web;
