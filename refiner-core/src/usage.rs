use std::sync::atomic::{AtomicU64, Ordering};

/// Token counters accumulated across every round of a session.
///
/// Shared by reference between the analyzer and readers; only the analyzer
/// increments.
#[derive(Debug, Default)]
pub struct SessionUsage {
    input_tokens: AtomicU64,
    output_tokens: AtomicU64,
}

/// Point-in-time copy of [`SessionUsage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageSnapshot {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl UsageSnapshot {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl SessionUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, input_tokens: u64, output_tokens: u64) {
        self.input_tokens.fetch_add(input_tokens, Ordering::Relaxed);
        self.output_tokens.fetch_add(output_tokens, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.input_tokens.store(0, Ordering::Relaxed);
        self.output_tokens.store(0, Ordering::Relaxed);
    }

    pub fn read(&self) -> UsageSnapshot {
        UsageSnapshot {
            input_tokens: self.input_tokens.load(Ordering::Relaxed),
            output_tokens: self.output_tokens.load(Ordering::Relaxed),
        }
    }
}
