use std::sync::mpsc::{channel, Receiver, Sender};

/// Sending half of a progress subscription.
///
/// Multi-unit extractors (PDF pages, EPUB items) report a percentage after
/// each unit; single-shot extractors report exactly one 100 on completion.
/// Updates are clamped to 100 and forced monotonic non-decreasing, so a
/// subscriber observes zero or more increasing values and then the terminal
/// result through the extraction's return value. A disconnected receiver is
/// silently ignored.
pub struct ProgressTx {
    tx: Option<Sender<u8>>,
    last: u8,
}

impl ProgressTx {
    /// A sink that drops every update, for callers that do not subscribe.
    #[must_use]
    pub fn none() -> Self {
        Self { tx: None, last: 0 }
    }

    /// Create a subscribed sink and its receiving end.
    #[must_use]
    pub fn channel() -> (Self, Receiver<u8>) {
        let (tx, rx) = channel();
        (
            Self {
                tx: Some(tx),
                last: 0,
            },
            rx,
        )
    }

    /// Report completion of a fraction of the work, as a 0-100 percentage.
    pub fn report(&mut self, pct: u8) {
        let mut pct = pct.min(100);
        if pct < self.last {
            pct = self.last;
        }
        self.last = pct;
        if let Some(tx) = &self.tx {
            let _ = tx.send(pct);
        }
    }

    /// Report the terminal 100.
    pub fn done(&mut self) {
        self.report(100);
    }
}
