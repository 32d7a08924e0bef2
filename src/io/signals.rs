//! Unix signal handling.
//!
//! A dedicated thread turns signals into Core messages:
//!
//! - SIGINT, SIGTERM, SIGHUP: shut down
//! - SIGUSR1: refresh weather now
//!
//! `kill -USR1 $(pidof kello)` is the scripted equivalent of pressing `r`.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR1},
    iterator::{Handle, Signals},
};
use std::sync::mpsc::Sender;
use std::thread;

use crate::core::CoreMessage;

/// Map a signal number to the message it requests, if any.
pub fn message_for_signal(signal: i32) -> Option<CoreMessage> {
    match signal {
        SIGINT | SIGTERM | SIGHUP => Some(CoreMessage::Shutdown),
        SIGUSR1 => Some(CoreMessage::Refresh),
        _ => None,
    }
}

/// Running signal thread. Dropping it unregisters the handlers and joins the thread.
pub struct SignalForwarder {
    handle: Handle,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for SignalForwarder {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Start forwarding signals into `sender`.
pub fn setup_signal_handler(sender: Sender<CoreMessage>) -> Result<SignalForwarder> {
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR1])
        .context("failed to register signal handlers")?;
    let handle = signals.handle();

    let thread = thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                let Some(message) = message_for_signal(sig) else {
                    continue;
                };
                let shutdown = matches!(message, CoreMessage::Shutdown);

                if shutdown {
                    log_pipe!();
                    log_info!("Received signal {}, shutting down", sig);
                } else {
                    log_debug!("Received SIGUSR1, refreshing weather");
                }

                if sender.send(message).is_err() || shutdown {
                    break;
                }
            }
        })
        .context("failed to spawn signal thread")?;

    Ok(SignalForwarder {
        handle,
        thread: Some(thread),
    })
}
