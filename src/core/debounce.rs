//! Keystroke debouncing.
//!
//! Rapid input is coalesced: each pushed text restarts a quiet interval, and
//! only the last text pushed before the interval elapses is emitted.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

/// Quiet interval used by the popup.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Input side of a debounced text stream.
///
/// Dropping the debouncer flushes any pending text and closes the output.
pub struct Debouncer {
    input: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    /// Spawn the debouncing task on the current runtime.
    pub fn spawn(interval: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output, output_rx) = mpsc::unbounded_channel();

        tokio::spawn(coalesce(interval, input_rx, output));

        (Self { input }, output_rx)
    }

    /// Queue text. Returns false once the output side is gone.
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.input.send(text.into()).is_ok()
    }
}

async fn coalesce(
    interval: Duration,
    mut input: mpsc::UnboundedReceiver<String>,
    output: mpsc::UnboundedSender<String>,
) {
    while let Some(mut pending) = input.recv().await {
        loop {
            match timeout(interval, input.recv()).await {
                Ok(Some(newer)) => pending = newer,
                Ok(None) => {
                    let _ = output.send(pending);
                    return;
                }
                Err(_) => {
                    if output.send(pending).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
