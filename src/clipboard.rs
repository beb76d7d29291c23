//! System clipboard access for the copy action.

use anyhow::{Context, Result};

/// Copy text to the system clipboard.
/// Fire-and-forget from the caller's point of view; the caller only
/// reports success or failure, nothing is fatal here.
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Clipboard write failed")?;
    Ok(())
}
