//! Attachment preview pipeline.
//!
//! Each selected file independently produces a [`Preview`]: images are read
//! in full on a worker thread and encoded as a self-contained `data:` URI;
//! everything else resolves immediately to a placeholder. Results are
//! delivered as [`PreviewUpdate`] messages over an mpsc channel and applied
//! by the single-threaded event loop; workers never touch the draft.
//!
//! Completion order across files is not guaranteed; consumers correlate by
//! [`AttachmentId`], never by position.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, warn};

use crate::error::{CapsuleError, Result};
use crate::model::{AttachmentId, DraftGeneration, Preview};

/// A completed preview, tagged with the draft generation and attachment id
/// it belongs to. The consumer drops updates whose generation is stale.
#[derive(Debug, Clone)]
pub struct PreviewUpdate {
    pub generation: DraftGeneration,
    pub id: AttachmentId,
    pub preview: Preview,
}

/// File metadata gathered at selection time.
#[derive(Debug, Clone)]
pub struct FileProbe {
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}

/// Inspect a file about to be attached: existence, name, declared media
/// type (from the extension) and size.
pub fn probe(path: &Path) -> Result<FileProbe> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CapsuleError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(CapsuleError::io(path, e)),
    };
    if !meta.is_file() {
        return Err(CapsuleError::InvalidPath(path.display().to_string()));
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CapsuleError::InvalidPath(path.display().to_string()))?;

    Ok(FileProbe {
        content_type: content_type_for_path(path),
        filename,
        size: meta.len(),
    })
}

/// Declared media type for a path, from its extension.
///
/// Unknown extensions fall back to `application/octet-stream`; only the
/// `image/` prefix matters for classification.
pub fn content_type_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

/// Whether a declared media type is image-typed.
pub fn is_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

/// Encode file content as a self-contained `data:` URI.
pub fn encode_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(bytes))
}

/// Hands out preview work and reports results over a channel.
///
/// Cheap to clone the sender side into worker threads; dropping the pipeline
/// does not cancel in-flight reads; their results are simply discarded when
/// the receiver is gone or the generation no longer matches.
#[derive(Debug)]
pub struct PreviewPipeline {
    tx: Sender<PreviewUpdate>,
}

impl PreviewPipeline {
    pub fn new(tx: Sender<PreviewUpdate>) -> Self {
        Self { tx }
    }

    /// Request a preview for one attachment.
    ///
    /// Non-images resolve synchronously to [`Preview::Unpreviewable`].
    /// Images spawn a worker thread that reads the file and encodes the
    /// thumbnail; a failed read degrades to `Unpreviewable` instead of
    /// dropping the attachment.
    pub fn request(
        &self,
        generation: DraftGeneration,
        id: AttachmentId,
        path: PathBuf,
        content_type: &str,
    ) {
        if !is_image(content_type) {
            let _ = self.tx.send(PreviewUpdate {
                generation,
                id,
                preview: Preview::Unpreviewable,
            });
            return;
        }

        let tx = self.tx.clone();
        let content_type = content_type.to_string();
        thread::spawn(move || {
            let preview = match fs::read(&path) {
                Ok(bytes) => {
                    debug!(path = %path.display(), bytes = bytes.len(), "Encoded thumbnail");
                    Preview::Thumbnail(encode_data_uri(&content_type, &bytes))
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Preview read failed");
                    Preview::Unpreviewable
                }
            };
            // Receiver may already be gone (app quit); nothing to do then.
            let _ = tx.send(PreviewUpdate {
                generation,
                id,
                preview,
            });
        });
    }
}
