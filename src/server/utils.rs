use std::net::TcpListener;
use std::path::Path;

/// Generate a Content-Type header
pub fn content_type_header(value: &str) -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).unwrap()
}

/// Generate a Cache-Control header
pub fn cache_control_header(value: &str) -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Cache-Control"[..], value.as_bytes()).unwrap()
}

/// Check if the given port is available
pub fn is_port_available(port: u16) -> bool {
    TcpListener::bind(format!("0.0.0.0:{port}")).is_ok()
}

/// Find the first free port in the inclusive window `start..=start+10`.
///
/// Each probe binds a listener and immediately releases it, so this is a
/// best-effort check: something else can grab the port between the probe and
/// the actual bind.
pub fn find_available_port(start: u16) -> Option<u16> {
    (0u16..=10)
        .filter_map(|offset| start.checked_add(offset))
        .find(|&port| is_port_available(port))
}

/// Warn about conventional files the served page usually needs.
///
/// Advisory only; startup proceeds either way.
pub fn check_conventional_files() {
    if !Path::new("index.html").exists() {
        eprintln!("⚠️  Warning: index.html not found in the working directory");
    }

    if !Path::new("main.wasm").exists() {
        eprintln!("⚠️  Warning: main.wasm not found in the working directory");
        eprintln!("   Run your build step first to produce it");
    }
}

/// Print the startup banner
pub fn print_server_banner(dir: &str, port: u16) {
    println!("\n\x1b[1;34m╭\x1b[0m");
    println!("  🌐 \x1b[1;36mWebAssembly Development Server\x1b[0m\n");
    println!("  📁 \x1b[1;34mServing directory:\x1b[0m \x1b[1;33m{dir}\x1b[0m");
    println!(
        "  🚀 \x1b[1;34mServer URL:\x1b[0m \x1b[4;36mhttp://localhost:{port}\x1b[0m"
    );
    println!("\n  \x1b[0;90mPress Ctrl+C to stop the server\x1b[0m");
    println!("\x1b[1;34m╰\x1b[0m\n");
}
