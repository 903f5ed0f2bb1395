//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::ServiceError;
use std::io::ErrorKind;

impl HttpServer {
    /// Turn a bind failure into an actionable message
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> ServiceError {
        match error.kind() {
            ErrorKind::AddrInUse => ServiceError::server(format!(
                "Port {} is already in use. Stop the other process or start with --port {} (or ITEMS_PORT={})",
                port,
                port.saturating_add(1),
                port.saturating_add(1)
            )),
            ErrorKind::PermissionDenied => ServiceError::server(format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. --port 8080",
                port
            )),
            _ => ServiceError::server(format!("Failed to bind to {}: {}", bind_addr, error)),
        }
    }
}
