//! TUI widgets, one module per panel or popup.

pub mod attach_popup;
pub mod attachments;
pub mod compose;
pub mod embed_popup;
pub mod header_bar;
pub mod help_popup;
pub mod sealed;
pub mod status_bar;
