//! System clipboard via arboard

use super::ClipboardBackend;
use crate::error::ClipboardError;

/// Clipboard backed by the OS. The handle is opened lazily on first use and
/// reopened after a failure.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| {
                tracing::warn!("Failed to open system clipboard: {}", e);
                ClipboardError::Denied(e.to_string())
            })?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Denied("clipboard unavailable".into()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        let result = self.handle()?.get_text();
        match result {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => {
                self.inner = None;
                Err(ClipboardError::Denied(e.to_string()))
            }
        }
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let result = self.handle()?.set_text(text);
        result.map_err(|e| {
            self.inner = None;
            ClipboardError::Denied(e.to_string())
        })
    }
}
