use clap::Parser;

/// wasmdev - static development server for WebAssembly 🌐
#[derive(Parser, Debug)]
#[command(
    name = "wasmdev",
    author,
    version,
    about = "A static development server for WebAssembly",
    long_about = "wasmdev serves static files (notably WebAssembly binaries) from a directory \
                  with correct MIME headers, auto-selecting a free port near the requested one."
)]
pub struct Args {
    /// Port to start probing from (default: 8000)
    #[arg(
        short = 'P',
        long,
        default_value_t = 8000,
        value_parser = clap::value_parser!(u16).range(1..=65535),
        help = "Server port number"
    )]
    pub port: u16,

    /// Directory described in the startup banner (default: current directory)
    #[arg(
        short = 'd',
        long,
        default_value = ".",
        value_hint = clap::ValueHint::DirPath,
        help = "Directory to serve"
    )]
    pub dir: String,

    /// Open the served URL in the default browser once running
    #[arg(long, help = "Open the browser after startup")]
    pub open: bool,

    /// Enable per-request debug logging
    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

pub fn get_args() -> Args {
    Args::parse()
}
