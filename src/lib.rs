//! VoluntAí volunteer-matching REST API - Library exports for testing
//!
//! (c) VoluntAí 2026

pub mod api;
pub mod core;
pub mod infrastructure;

use crate::infrastructure::token::TokenKey;
use tokio::sync::OnceCell;

/// Process-wide credential signing key, set once at startup from mandatory
/// configuration.
pub static TOKEN_KEY: OnceCell<TokenKey> = OnceCell::const_new();
