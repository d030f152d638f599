//! Session configuration.

/// Default upper bound on input length, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 256;

/// Knobs for a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Add NPC persona notes and the inventory line to `look`.
    pub verbose_look: bool,
    /// Whether an installed narrator is consulted.
    pub narration: bool,
    /// Longer input is rejected without parsing.
    pub max_input_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verbose_look: false,
            narration: true,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbose look output.
    pub fn with_verbose_look(mut self, verbose: bool) -> Self {
        self.verbose_look = verbose;
        self
    }

    /// Turn narration on or off.
    pub fn with_narration(mut self, narration: bool) -> Self {
        self.narration = narration;
        self
    }

    /// Set the input length limit.
    pub fn with_max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::new();
        assert!(!config.verbose_look);
        assert!(config.narration);
        assert_eq!(config.max_input_len, DEFAULT_MAX_INPUT_LEN);
    }

    #[test]
    fn builder() {
        let config = SessionConfig::new()
            .with_verbose_look(true)
            .with_narration(false)
            .with_max_input_len(16);
        assert!(config.verbose_look);
        assert!(!config.narration);
        assert_eq!(config.max_input_len, 16);
    }
}
