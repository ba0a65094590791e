use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tiny_http::{Request, Response, StatusCode};

use super::mime::MimeTable;
use super::utils::{cache_control_header, content_type_header};
use crate::debug_println;

/// Outcome of resolving a request path against the filesystem.
pub(crate) struct FileResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub no_cache: bool,
    pub body: Vec<u8>,
}

/// Handle an incoming HTTP request
pub fn handle_request(request: Request, mime: &MimeTable) {
    let url = request.url().to_string();
    debug_println!("Received request for: {url}");

    let file = fetch(Path::new("."), &url, mime);

    let mut response =
        Response::from_data(file.body).with_status_code(StatusCode(file.status));

    if let Some(content_type) = file.content_type {
        response = response.with_header(content_type_header(content_type));
    }
    if file.no_cache {
        response = response.with_header(cache_control_header("no-cache"));
    }

    if let Err(e) = request.respond(response) {
        eprintln!("❗ Error sending response for {url}: {e}");
    }
}

/// Map a request path to a file under `base` and read it whole.
///
/// `/` is substituted with `/index.html`, then exactly one leading slash is
/// stripped to form a relative path. In production `base` is the working
/// directory; the path is joined as-is, so `..` segments can point outside
/// the served tree (flagged in the tests below).
pub(crate) fn fetch(base: &Path, request_path: &str, mime: &MimeTable) -> FileResponse {
    // The query string is not part of the file path
    let path = request_path.split('?').next().unwrap_or(request_path);

    let path = if path == "/" { "/index.html" } else { path };
    let relative = path.strip_prefix('/').unwrap_or(path);

    let extension = extension_of(relative);
    let mut content_type = mime.lookup(extension);
    let mut no_cache = false;

    // Browsers must always re-fetch freshly rebuilt WASM binaries
    if extension == ".wasm" {
        content_type = Some("application/wasm");
        no_cache = true;
    }

    match fs::read(base.join(relative)) {
        Ok(body) => FileResponse {
            status: 200,
            content_type,
            no_cache,
            body,
        },
        Err(e) if e.kind() == ErrorKind::NotFound => FileResponse {
            status: 404,
            content_type: None,
            no_cache: false,
            body: b"404 Not Found".to_vec(),
        },
        Err(e) => {
            // Logged server-side only; the client gets a generic body
            eprintln!("❗ Error reading {relative}: {e}");
            FileResponse {
                status: 500,
                content_type: None,
                no_cache: false,
                body: b"Internal Server Error".to_vec(),
            }
        }
    }
}

/// Extension from the last `.` to the end of the path, dot included.
/// Empty string if the path has no dot.
fn extension_of(path: &str) -> &str {
    path.rfind('.').map(|idx| &path[idx..]).unwrap_or("")
}
