//! Paróquia Core - Shared types library.
//!
//! This crate provides the types used across the Paróquia Web components:
//! - `web` - Public parish site and administrative back-office
//! - `integration-tests` - End-to-end checks against a fake parish API
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async runtime. Everything that decides *what* should happen
//! (who is logged in, whether a route may render, whether an event still has
//! spots, whether a polled response is stale) lives here so it can be tested
//! without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, and the role flag
//! - [`user`] - The authenticated user record
//! - [`session`] - Session state with the derived authentication flag
//! - [`guard`] - Route guard decision table
//! - [`captcha`] - CAPTCHA capability trait
//! - [`records`] - Transfer records exchanged with the parish API
//! - [`capacity`] - Event capacity counter
//! - [`feed`] - Sequence-guarded slot for polled data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod capacity;
pub mod captcha;
pub mod feed;
pub mod guard;
pub mod records;
pub mod session;
pub mod types;
pub mod user;

pub use capacity::Capacity;
pub use captcha::{CaptchaChallenge, SubmittedCaptcha};
pub use feed::{LatestSlot, Sequence};
pub use guard::{GuardConfig, GuardDecision};
pub use session::SessionState;
pub use types::*;
pub use user::UserRecord;
