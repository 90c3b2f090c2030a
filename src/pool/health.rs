//! Per-key health counters

/// Success and error counters for a single API key.
///
/// A key is considered exhausted once its consecutive error count reaches
/// the pool's threshold; a single success fully rehabilitates it.
#[derive(Debug, Clone, Default)]
pub struct KeyHealth {
    success_count: u64,
    error_count: u32,
}

impl KeyHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Check whether the key has reached the error threshold.
    pub fn is_exhausted(&self, max_errors: u32) -> bool {
        self.error_count >= max_errors
    }

    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
        self.error_count = 0;
    }

    pub(crate) fn record_failure(&mut self) {
        self.error_count += 1;
    }

    pub(crate) fn clear_errors(&mut self) {
        self.error_count = 0;
    }
}
