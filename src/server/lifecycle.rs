use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tiny_http::Server;

use super::config::ServerConfig;
use super::handler;
use super::mime::MimeTable;
use super::utils;
use crate::error::{Result, ServerError};

/// Why the main wait unblocked.
pub enum ShutdownCause {
    /// SIGINT or SIGTERM was delivered to the process
    Signal,
    /// The accept loop died outside of an intentional close
    ListenerFault(String),
}

/// Runtime state of the running listener. Created on start, consumed on
/// stop; nothing else touches it.
struct ServerHandle {
    server: Arc<Server>,
    closing: Arc<AtomicBool>,
    thread: thread::JoinHandle<()>,
    port: u16,
}

/// The development server lifecycle controller.
///
/// `run()` drives the whole sequence: resolve a port, bind, serve on a
/// background thread, block until a shutdown cause arrives, then close the
/// listener immediately (no drain).
pub struct DevServer {
    config: ServerConfig,
    handle: Option<ServerHandle>,
}

impl DevServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            handle: None,
        }
    }

    /// Port the listener is bound to, once started
    #[allow(dead_code)]
    pub fn port(&self) -> Option<u16> {
        self.handle.as_ref().map(|handle| handle.port)
    }

    /// Resolve the final port, starting from the configured one.
    pub fn resolve_port(&self) -> Result<u16> {
        utils::find_available_port(self.config.port).ok_or_else(|| {
            ServerError::no_available_port(
                self.config.port,
                self.config.port.saturating_add(10),
            )
            .into()
        })
    }

    /// Bind the listener and launch the accept loop on a background thread.
    ///
    /// `fault_tx` receives a `ListenerFault` if the accept loop dies for any
    /// reason other than `stop()` closing the listener.
    pub fn start(&mut self, fault_tx: Sender<ShutdownCause>) -> Result<u16> {
        let port = self.resolve_port()?;

        if port != self.config.port {
            println!(
                "⚠️  Port {} is already in use, switching to port {port}",
                self.config.port
            );
        }

        utils::check_conventional_files();

        let server = Server::http(format!("0.0.0.0:{port}"))
            .map_err(|e| ServerError::bind_failed(port, e.to_string()))?;
        let server = Arc::new(server);
        let closing = Arc::new(AtomicBool::new(false));

        let accept_server = Arc::clone(&server);
        let accept_closing = Arc::clone(&closing);
        let thread = thread::spawn(move || {
            let mime = MimeTable::new();

            loop {
                match accept_server.recv() {
                    Ok(request) => handler::handle_request(request, &mime),
                    Err(e) => {
                        // An intentional close also surfaces here; only an
                        // unexpected error is a fault worth reporting.
                        if accept_closing.load(Ordering::SeqCst) {
                            break;
                        }
                        let _ = fault_tx.send(ShutdownCause::ListenerFault(e.to_string()));
                        break;
                    }
                }
            }
        });

        self.handle = Some(ServerHandle {
            server,
            closing,
            thread,
            port,
        });

        Ok(port)
    }

    /// Close the listener and join the accept thread.
    ///
    /// Idempotent; calling this without a running server is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.closing.store(true, Ordering::SeqCst);
            handle.server.unblock();

            if handle.thread.join().is_err() {
                eprintln!("❗ Server thread panicked during shutdown");
            }
        }
    }

    /// Start the server and block until an interrupt or a listener fault.
    pub fn run(&mut self) -> Result<()> {
        let (tx, rx) = channel();

        let signal_tx = tx.clone();
        ctrlc::set_handler(move || {
            let _ = signal_tx.send(ShutdownCause::Signal);
        })
        .map_err(|e| ServerError::signal_setup(e.to_string()))?;

        let port = self.start(tx)?;

        utils::print_server_banner(&self.config.dir, port);

        if self.config.open {
            let url = format!("http://localhost:{port}");
            if let Err(e) = webbrowser::open(&url) {
                println!("❗ Failed to open browser automatically: {e}");
            }
        }

        self.wait_for_shutdown(rx)
    }

    /// Block until a shutdown cause arrives, then close the listener.
    ///
    /// A signal is a normal shutdown; a listener fault stops the server the
    /// same way but surfaces as a fatal error so the process exits nonzero
    /// instead of waiting forever on a dead listener.
    fn wait_for_shutdown(&mut self, rx: Receiver<ShutdownCause>) -> Result<()> {
        // Both senders stay alive for the life of the wait, so a recv error
        // is treated like a plain shutdown request.
        match rx.recv() {
            Ok(ShutdownCause::Signal) | Err(_) => {
                println!("\n🛑 Shutting down server...");
                self.stop();
                Ok(())
            }
            Ok(ShutdownCause::ListenerFault(reason)) => {
                self.stop();
                Err(ServerError::listener_fault(reason).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::utils::is_port_available;
    use std::net::TcpListener;

    fn test_config(port: u16) -> ServerConfig {
        ServerConfig {
            port,
            dir: ".".to_string(),
            open: false,
        }
    }

    #[test]
    fn test_stop_without_start_is_a_noop() {
        let mut server = DevServer::new(test_config(53230));
        server.stop();
        server.stop();
        assert_eq!(server.port(), None);
    }

    #[test]
    fn test_start_binds_in_window_and_stop_releases() {
        let start_port = 53240;
        let mut server = DevServer::new(test_config(start_port));

        let (tx, _rx) = channel();
        let port = server.start(tx).expect("server should start");

        assert!(port >= start_port && port <= start_port + 10);
        assert_eq!(server.port(), Some(port));
        assert!(!is_port_available(port));

        server.stop();
        assert_eq!(server.port(), None);

        // Idempotent
        server.stop();
    }

    #[test]
    fn test_resolve_port_skips_occupied_start() {
        let start_port = 53260;
        let _guard = match TcpListener::bind(format!("0.0.0.0:{start_port}")) {
            Ok(listener) => Some(listener),
            // Someone else already holds it, which works just as well
            Err(_) => None,
        };

        let server = DevServer::new(test_config(start_port));
        let port = server.resolve_port().expect("window should have a free port");

        assert!(port > start_port && port <= start_port + 10);
    }

    #[test]
    fn test_signal_cause_shuts_down_cleanly() {
        let mut server = DevServer::new(test_config(53300));

        let (tx, rx) = channel();
        tx.send(ShutdownCause::Signal).unwrap();

        assert!(server.wait_for_shutdown(rx).is_ok());
    }

    #[test]
    fn test_listener_fault_cause_is_fatal() {
        let mut server = DevServer::new(test_config(53310));

        let (tx, rx) = channel();
        tx.send(ShutdownCause::ListenerFault("accept failed".to_string()))
            .unwrap();

        let result = server.wait_for_shutdown(rx);
        match result {
            Err(crate::error::WasmdevError::Server(ServerError::ListenerFault { reason })) => {
                assert_eq!(reason, "accept failed");
            }
            other => panic!("expected a listener fault error, got {other:?}"),
        }
    }

    #[test]
    fn test_dead_listener_unblocks_wait_with_fault() {
        let start_port = 53320;
        let mut server = DevServer::new(test_config(start_port));

        let (tx, rx) = channel();
        server.start(tx).expect("server should start");

        // Break the listener out from under the accept loop without setting
        // the intentional-close flag; the loop must report a fault rather
        // than die silently and leave the wait hanging.
        server.handle.as_ref().unwrap().server.unblock();

        let result = server.wait_for_shutdown(rx);
        assert!(
            matches!(
                result,
                Err(crate::error::WasmdevError::Server(
                    ServerError::ListenerFault { .. }
                ))
            ),
            "expected a listener fault error, got {result:?}"
        );
        // The fault path also tears the server down
        assert_eq!(server.port(), None);
    }

    #[test]
    fn test_started_server_answers_requests() {
        let start_port = 53280;
        let mut server = DevServer::new(test_config(start_port));

        let (tx, _rx) = channel();
        let port = server.start(tx).expect("server should start");

        let response = ureq::get(format!("http://127.0.0.1:{port}/no-such-file.txt")).call();
        match response {
            Err(ureq::Error::StatusCode(code)) => assert_eq!(code, 404),
            Ok(response) => assert_eq!(response.status().as_u16(), 404),
            Err(e) => panic!("request failed: {e}"),
        }

        server.stop();
    }
}
