use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub const DATA_URL_PREFIX: &str = "data:";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Encodes file bytes as a base64 `data:` URL for the preview image.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = mime.trim();
    let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
    format!("{DATA_URL_PREFIX}{mime};base64,{}", STANDARD.encode(bytes))
}

/// Issued when a file read starts; only the newest ticket may update the
/// preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

/// Counts image selections so a slow read finishing after a newer one is
/// discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewGeneration {
    current: u64,
}

impl PreviewGeneration {
    pub fn begin(&mut self) -> PreviewTicket {
        self.current += 1;
        PreviewTicket(self.current)
    }

    pub fn is_current(self, ticket: PreviewTicket) -> bool {
        ticket.0 == self.current
    }
}
