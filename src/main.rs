mod cli;
mod debug;
mod error;
mod server;

use std::error::Error;
use std::path::Path;

use debug::enable_debug;
use error::{Result, WasmdevError};
use server::{DevServer, ServerConfig};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("\n🔥 wasmdev encountered an unexpected error:");
        eprintln!("{panic_info}");
        eprintln!("\n📋 Please report this with your command and this error message.");
    }));

    let args = cli::get_args();

    if args.debug {
        enable_debug();
    }

    if let Err(e) = run(args) {
        let mut error_source: &dyn Error = &e;
        eprintln!("❌ {error_source}");

        while let Some(source) = error_source.source() {
            eprintln!("   Caused by: {source}");
            error_source = source;
        }

        std::process::exit(1);
    }

    println!("✅ Server closed");
}

fn run(args: cli::Args) -> Result<()> {
    if !Path::new(&args.dir).is_dir() {
        return Err(WasmdevError::directory_not_found(&args.dir));
    }

    let config = ServerConfig {
        port: args.port,
        dir: args.dir,
        open: args.open,
    };

    let mut server = DevServer::new(config);
    server.run()
}
