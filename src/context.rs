//! Execution Context Module
//!
//! Carries per-execution information handed to TTL strategies and cache policies.

// == Context ==
/// Per-execution context.
///
/// The operation key doubles as the default cache key for a cache policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Key identifying the operation being executed
    operation_key: String,
}

impl Context {
    /// Creates a context for the given operation key.
    pub fn new(operation_key: impl Into<String>) -> Self {
        Self {
            operation_key: operation_key.into(),
        }
    }

    /// Returns the operation key.
    pub fn operation_key(&self) -> &str {
        &self.operation_key
    }
}
