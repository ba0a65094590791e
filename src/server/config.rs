/// Configuration struct for server setup
///
/// Immutable after construction; supplied by the CLI layer. `dir` is what the
/// startup banner describes as the serving directory; file lookups resolve
/// against the working directory (see the handler).
pub struct ServerConfig {
    pub port: u16,
    pub dir: String,
    pub open: bool,
}
