//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Legacy short form: all names on one line separated by two spaces
    pub compact: bool,
}
