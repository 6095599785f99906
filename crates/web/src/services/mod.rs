//! Business logic services for the web front end.
//!
//! # Services
//!
//! - `auth` - Session probe, credential exchange, logout
//! - `captcha` - CAPTCHA widget rendering data and token extraction
//! - `feeds` - Background polling of the public lists

pub mod auth;
pub mod captcha;
pub mod feeds;

pub use auth::{AuthError, AuthService};
pub use captcha::CaptchaWidget;
pub use feeds::{Feed, Feeds};
