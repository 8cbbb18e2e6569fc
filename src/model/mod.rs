//! Core capsule data types.

pub mod draft;
pub mod record;

pub use draft::{Attachment, AttachmentId, CapsuleDraft, DraftGeneration, Preview};
pub use record::CapsuleRecord;
