//! Embed snippet generation.
//!
//! Emits an HTML fragment that embeds the capsule page in a fixed-size
//! frame. Stateless; the only processing is escaping quote characters so
//! the address cannot break out of the attribute.

/// Build the `<iframe>` embed snippet for a page address.
pub fn embed_snippet(url: &str) -> String {
    let escaped = url.replace('"', "&quot;");
    format!(
        "<iframe src=\"{escaped}\" width=\"100%\" height=\"900\" \
         style=\"border:none; border-radius: 12px;\" title=\"Capsule\"></iframe>"
    )
}
