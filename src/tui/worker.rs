//! Runs controller requests off the UI thread.
//!
//! Each request gets its own short-lived thread; finished responses queue up
//! on a channel that the event loop drains every tick. Nothing is cancelled:
//! the controller drops responses it no longer wants.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
#[cfg(test)]
use std::time::Duration;

use crate::api::MailApi;
use crate::controller::{Request, Response};

/// Executes requests in the background and collects their responses.
pub struct Worker {
    api: Arc<dyn MailApi>,
    tx: Sender<Response>,
    rx: Receiver<Response>,
    pending: usize,
}

impl Worker {
    pub fn new(api: Arc<dyn MailApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            pending: 0,
        }
    }

    /// Start `request` on a background thread.
    pub fn dispatch(&mut self, request: Request) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.pending += 1;
        thread::spawn(move || {
            let response = request.execute(api.as_ref());
            // The receiver is gone only when the UI has shut down.
            let _ = tx.send(response);
        });
    }

    /// Next finished response, without blocking.
    pub fn try_next(&mut self) -> Option<Response> {
        let response = self.rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(response)
    }

    /// Next finished response, waiting up to `timeout`.
    #[cfg(test)]
    pub fn wait_next(&mut self, timeout: Duration) -> Option<Response> {
        let response = self.rx.recv_timeout(timeout).ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(response)
    }

    /// Requests started but not yet collected.
    pub fn pending(&self) -> usize {
        self.pending
    }
}
