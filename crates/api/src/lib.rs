//! Green Homes admin API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, routes)
//! so the binaries and the integration tests share one router.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
