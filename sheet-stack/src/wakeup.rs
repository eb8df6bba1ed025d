//! Coalesced "stack changed" signal for async event loops.
//!
//! Subscribers see every mutation synchronously. An event loop that sleeps
//! between frames waits on a [`WakeupReceiver`] instead; a burst of pushes and
//! pops leaves at most a channel's worth of pending signals, which the loop
//! drains before redrawing once.

use tokio::sync::mpsc;

/// Capacity used by [`channel`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Sending half, installed into a stack with
/// [`SheetStack::install_wakeup`](crate::SheetStack::install_wakeup).
#[derive(Clone, Debug)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Send a wakeup signal without blocking.
    ///
    /// A full channel already holds a pending wakeup and a closed one means the
    /// loop is gone, so both errors are ignored.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }

    /// Whether the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the event loop.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Wait for the next wakeup. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Take one pending wakeup, if any.
    pub fn try_recv(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Discard every pending wakeup and return how many there were.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}

/// Create a wakeup channel with [`DEFAULT_CAPACITY`].
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    with_capacity(DEFAULT_CAPACITY)
}

/// Create a wakeup channel holding at most `capacity` pending signals.
pub fn with_capacity(capacity: usize) -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (WakeupSender { tx }, WakeupReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_clamped() {
        let (tx, mut rx) = with_capacity(0);
        tx.send();
        assert!(rx.try_recv());
    }

    #[test]
    fn test_full_channel_drops_extra_signals() {
        let (tx, mut rx) = with_capacity(2);
        for _ in 0..5 {
            tx.send();
        }
        assert_eq!(rx.drain(), 2);
        assert!(!rx.try_recv());
    }

    #[test]
    fn test_sender_reports_closed_receiver() {
        let (tx, rx) = channel();
        assert!(!tx.is_closed());
        drop(rx);
        assert!(tx.is_closed());
        tx.send();
    }
}
