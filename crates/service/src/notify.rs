//! Console notifier
//!
//! A [`Notifier`] receives plain text. The server installs one of the two
//! [`ConsoleNotifier`] variants chosen by `notifier.kind` in the config; they
//! only differ in the background colour they paint before each line.

use std::io::{self, Write};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use configs::NotifierKind;
use tracing::{debug, warn};

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

const ANSI_RESET: &str = "\x1b[0m";

fn background(kind: NotifierKind) -> &'static str {
    match kind {
        NotifierKind::Blue => "\x1b[44m",
        NotifierKind::Yellow => "\x1b[43m",
    }
}

/// Writes `"{message} {count}"` with a coloured background and bumps a
/// per-instance counter.
pub struct ConsoleNotifier {
    kind: NotifierKind,
    count: AtomicU64,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    pub fn stdout(kind: NotifierKind) -> Self {
        Self::with_writer(kind, Box::new(io::stdout()))
    }

    pub fn with_writer(kind: NotifierKind, out: Box<dyn Write + Send>) -> Self {
        Self { kind, count: AtomicU64::new(0), out: Mutex::new(out) }
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        let n = self.count.fetch_add(1, Ordering::SeqCst);
        let Ok(mut out) = self.out.lock() else {
            warn!(kind = ?self.kind, "notifier writer poisoned; message dropped");
            return;
        };
        if let Err(e) = writeln!(out, "{}{} {}{}", background(self.kind), message, n, ANSI_RESET).and_then(|_| out.flush()) {
            warn!(kind = ?self.kind, error = %e, "notifier write failed");
        }
        debug!(kind = ?self.kind, count = n, "notification written");
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut m) = self.messages.lock() {
            m.push(message.to_string());
        }
    }
}
