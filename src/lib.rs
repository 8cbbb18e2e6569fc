//! `capsuleShell` — a terminal time capsule.
//!
//! This crate provides the core library for composing a message to the
//! future: the capsule draft model, form validation, the asynchronous
//! attachment-preview pipeline, and the submission workflow.

pub mod clock;
pub mod config;
pub mod embed;
pub mod error;
pub mod i18n;
pub mod model;
pub mod preview;
pub mod submit;
pub mod tui;
pub mod validate;
