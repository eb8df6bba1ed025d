//! Sheet stack configuration.

/// Per-stack configuration.
///
/// Subscribers are notified on every effective mutation regardless of
/// configuration; these settings only affect logging and the wakeup edge.
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Label used in log lines for this stack.
    pub name: &'static str,

    /// Send a wakeup signal after each push or pop when a sender is installed.
    pub wakeup: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            name: "sheets",
            wakeup: true,
        }
    }
}

impl StackConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the log label.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Never send wakeup signals, even with a sender installed.
    pub fn without_wakeup(mut self) -> Self {
        self.wakeup = false;
        self
    }
}
