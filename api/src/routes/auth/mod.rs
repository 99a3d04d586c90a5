//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Login and token refresh
//! - Token validation and authentication status
//! - Logout
//! - Public authentication configuration
//! - The current principal

pub mod config;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod status;
pub mod validate;

pub use crate::app::AppState;
