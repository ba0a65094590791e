/// Fixed extension → MIME type table shared by the request handler.
///
/// Keys carry the leading dot. Read-only after construction, so the accept
/// loop owns one instance and hands out references; no synchronization
/// needed.
pub struct MimeTable;

impl MimeTable {
    pub fn new() -> Self {
        MimeTable
    }

    /// Look up the MIME type for an extension (leading dot included).
    ///
    /// Returns `None` for unmapped extensions so the response goes out
    /// without an explicit Content-Type.
    pub fn lookup(&self, extension: &str) -> Option<&'static str> {
        match extension {
            ".wasm" => Some("application/wasm"),
            ".js" => Some("application/javascript"),
            ".html" => Some("text/html"),
            ".css" => Some("text/css"),
            ".json" => Some("application/json"),
            ".png" => Some("image/png"),
            ".jpg" => Some("image/jpeg"),
            ".gif" => Some("image/gif"),
            ".svg" => Some("image/svg+xml"),
            ".ico" => Some("image/x-icon"),
            _ => None,
        }
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}
