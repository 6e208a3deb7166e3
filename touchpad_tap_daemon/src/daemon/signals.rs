//! SIGTERM/SIGINT handling for graceful daemon shutdown.
//!
//! `nix`'s `signal` feature gives raw `sigaction`-style registration, not a
//! self-pipe reactor, so the handler does the only thing strictly safe in
//! signal context: flip a static `AtomicBool`. The event loop polls it
//! between iterations, the same shape `keyrx_daemon`'s `SignalHandler`
//! exposes via a higher-level crate.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{self, SigHandler, Signal};

use crate::error::{DaemonResult, PlatformError};

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_shutdown_signal(_signal: libc_signal_number) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

// `nix::sys::signal::SigHandler::Handler` wants `extern "C" fn(c_int)`;
// spelled out as a type alias so the signature above stays readable.
#[allow(non_camel_case_types)]
type libc_signal_number = std::os::raw::c_int;

/// Installs SIGTERM and SIGINT handlers that set the shutdown flag.
///
/// # Errors
///
/// Returns `PlatformError::Poll` if `sigaction` itself fails (should not
/// happen on a sane Linux system).
pub fn install() -> DaemonResult<()> {
    unsafe {
        signal::signal(Signal::SIGTERM, SigHandler::Handler(handle_shutdown_signal))
            .map_err(|e| PlatformError::Poll(format!("sigaction(SIGTERM): {}", e)))?;
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_shutdown_signal))
            .map_err(|e| PlatformError::Poll(format!("sigaction(SIGINT): {}", e)))?;
    }
    Ok(())
}

/// `true` once SIGTERM or SIGINT has been received.
pub fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}
