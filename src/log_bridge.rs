//! Buffers Rust log lines so Dart can drain them and show in Flutter console (debugPrint).
//! Kept lines are also forwarded to the `log` facade for native hosts and tests.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static RUST_LOG_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

const MAX_BUFFER_LEN: usize = 500;

fn is_problem(lower: &str) -> bool {
    lower.contains("error") || lower.contains("warn") || lower.contains("failed")
}

fn should_log(s: &str) -> bool {
    let lower = s.to_lowercase();
    if is_problem(&lower) {
        return true;
    }

    // Persistence and lifecycle only; per-tap reducer chatter is dropped.
    lower.contains("persistence")
        || lower.contains("storage::")
        || lower.contains("colortap::open")
}

/// Push a log line. Called by rust_log! macro.
pub fn push(s: String) {
    if !should_log(&s) {
        return;
    }
    if is_problem(&s.to_lowercase()) {
        log::warn!(target: "colortap", "{}", s);
    } else {
        log::info!(target: "colortap", "{}", s);
    }
    if let Ok(mut v) = RUST_LOG_BUFFER.lock() {
        v.push(s);
        let n = v.len();
        if n > MAX_BUFFER_LEN {
            v.drain(0..n - MAX_BUFFER_LEN);
        }
    }
}

/// Take every buffered line, oldest first, leaving the buffer empty.
pub fn drain_rust_logs() -> Vec<String> {
    RUST_LOG_BUFFER
        .lock()
        .map(|mut v| std::mem::take(&mut *v))
        .unwrap_or_default()
}

#[macro_export]
macro_rules! rust_log {
    ($($t:tt)*) => {
        $crate::log_bridge::push(format!($($t)*))
    };
}
