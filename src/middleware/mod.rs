//! Plug-and-play login routes for Axum.
//!
//! Wires [`LoginOrchestrator`](crate::LoginOrchestrator) to an encrypted
//! cookie jar and a `GET`/`POST` login route.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use login_gate::middleware::{LoginConfig, login_routes, resolve_identity};
//!
//! // 1. Implement CredentialStore and SessionStore for your app
//! // 2. Configure from environment
//! let config = LoginConfig::from_env()?;
//!
//! // 3. Mount the login route
//! let app = axum::Router::new()
//!     .merge(login_routes(config, credential_store, session_store));
//!
//! // 4. Use resolve_identity() in your own middleware
//! let claim = resolve_identity(&session_store, &jar, "login_session").await?;
//! ```

mod config;
mod cookies;
mod error;
mod extractor;
mod routes;
mod state;

pub use config::LoginConfig;
pub use error::LoginError;
pub use extractor::resolve_identity;
pub use routes::login_routes;

/// Re-export cookie key type for builder API.
pub use axum_extra::extract::cookie::Key as CookieKey;
