//! The editable capsule draft and its attachments.
//!
//! A draft is mutated by user input and by the preview pipeline until it is
//! sealed. Each attachment owns its preview state, so insertion and removal
//! can never desynchronize an attachment from its preview.

use std::path::PathBuf;

/// Stable identity of an attachment within one draft.
///
/// Preview results are correlated by this id, never by list position, so
/// out-of-order completion and interleaved removals are safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AttachmentId(pub u64);

/// Identity of one draft's lifetime.
///
/// Bumped every time the draft is discarded and replaced. Asynchronous
/// results tagged with an old generation are dropped instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DraftGeneration(pub u64);

/// Displayable representation of an attachment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Preview {
    /// Content read still in flight.
    Pending,
    /// Self-contained `data:` URI for image attachments.
    Thumbnail(String),
    /// Placeholder for non-image attachments and failed reads.
    Unpreviewable,
}

/// One selected file, with its derived preview.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Identity within the owning draft.
    pub id: AttachmentId,

    /// Path of the selected file.
    pub path: PathBuf,

    /// File name shown in the attachment list.
    pub filename: String,

    /// Declared media type (e.g. `"image/png"`), derived from the extension.
    pub content_type: String,

    /// File size in bytes at selection time.
    pub size: u64,

    /// Derived preview. Starts as [`Preview::Pending`] for images.
    pub preview: Preview,
}

/// The in-progress capsule: form fields plus attachments, insertion order
/// significant.
///
/// `delivery_date` is kept as the raw entered string (`YYYY-MM-DD`) so that
/// partial input remains representable while the user types.
#[derive(Debug)]
pub struct CapsuleDraft {
    pub email: String,
    pub letter: String,
    pub delivery_date: String,
    pub attachments: Vec<Attachment>,

    generation: DraftGeneration,
    next_attachment_id: u64,
}

impl CapsuleDraft {
    /// Create an empty draft belonging to the given generation.
    pub fn new(generation: DraftGeneration) -> Self {
        Self {
            email: String::new(),
            letter: String::new(),
            delivery_date: String::new(),
            attachments: Vec::new(),
            generation,
            next_attachment_id: 0,
        }
    }

    /// The generation this draft belongs to.
    pub fn generation(&self) -> DraftGeneration {
        self.generation
    }

    /// Append an attachment with a fresh id and a `Pending` preview.
    /// Returns the assigned id.
    pub fn add_attachment(
        &mut self,
        path: PathBuf,
        filename: String,
        content_type: String,
        size: u64,
    ) -> AttachmentId {
        let id = AttachmentId(self.next_attachment_id);
        self.next_attachment_id += 1;
        self.attachments.push(Attachment {
            id,
            path,
            filename,
            content_type,
            size,
            preview: Preview::Pending,
        });
        id
    }

    /// Remove the attachment at `index`, together with its preview.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// Store a preview result by attachment id.
    ///
    /// Returns `false` when the attachment no longer exists (removed while
    /// the preview was in flight); the caller simply drops the result.
    pub fn set_preview(&mut self, id: AttachmentId, preview: Preview) -> bool {
        match self.attachments.iter_mut().find(|a| a.id == id) {
            Some(att) => {
                att.preview = preview;
                true
            }
            None => false,
        }
    }

    /// Number of attachments whose preview is still pending.
    pub fn pending_previews(&self) -> usize {
        self.attachments
            .iter()
            .filter(|a| a.preview == Preview::Pending)
            .count()
    }
}
