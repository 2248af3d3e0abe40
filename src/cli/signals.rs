//! Shutdown signal handling

use tokio::signal::unix::{signal, Signal, SignalKind};

/// Waits for SIGINT or SIGTERM.
///
/// Handlers are installed on creation, so a signal that arrives before
/// [`ShutdownSignal::recv`] is polled is not lost.
pub struct ShutdownSignal {
    sigint: Signal,
    sigterm: Signal,
}

impl ShutdownSignal {
    /// Install the handlers. Must be called inside a tokio runtime.
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the next shutdown signal and return its name
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.sigint.recv() => "SIGINT",
            _ = self.sigterm.recv() => "SIGTERM",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handlers_install_inside_runtime() {
        assert!(ShutdownSignal::new().is_ok());
    }
}
