//! Run configuration for the validation driver

/// Default number of errors collected before a run stops early
pub const DEFAULT_MAX_ERRORS: usize = 1000;

/// Default number of lines between progress notices
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Settings for one validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Stop once this many errors are collected; `None` reports every error
    pub max_errors: Option<usize>,
    /// Emit a progress notice every this many lines; 0 disables it
    pub progress_interval: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_errors: Some(DEFAULT_MAX_ERRORS),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ValidatorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error budget
    pub fn with_max_errors(mut self, max_errors: Option<usize>) -> Self {
        self.max_errors = max_errors.filter(|n| *n > 0);
        self
    }

    /// Set the error budget from a command-line style value, where zero or a
    /// negative number means unlimited
    pub fn with_max_errors_arg(self, max_errors: i64) -> Self {
        let budget = usize::try_from(max_errors).ok();
        self.with_max_errors(budget)
    }

    /// Set the progress interval
    pub fn with_progress_interval(mut self, lines: usize) -> Self {
        self.progress_interval = lines;
        self
    }

    /// Whether `error_count` errors exhaust the budget
    pub fn budget_exhausted(&self, error_count: usize) -> bool {
        self.max_errors.is_some_and(|max| error_count >= max)
    }
}
