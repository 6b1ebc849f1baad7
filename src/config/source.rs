use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::ConfigError;

/// A provider of a flat key-value mapping loaded from one location.
///
/// Sources are identified by construction order, not content: two sources
/// declared from the same location are distinct entities. The resolved
/// location is recorded at most once, by a successful [`load`](Source::load).
pub trait Source: Send + Sync + fmt::Debug {
    /// Kind tag used in diagnostics, e.g. `"filesystem"`.
    fn kind(&self) -> &'static str;

    /// The location string as declared by the caller.
    fn declared(&self) -> &str;

    /// The fully resolved location, available only after a successful load.
    fn resolved(&self) -> Option<&str>;

    /// Loads the flat key-value mapping from this source.
    ///
    /// A failure here means the whole source is unusable; a key missing
    /// from the returned mapping is not an error at this layer.
    fn load(&self) -> Result<HashMap<String, String>, ConfigError>;

    /// Renders `kind:declared -> resolved` for diagnostics.
    fn description(&self) -> String {
        format!(
            "{}:{} -> {}",
            self.kind(),
            self.declared(),
            self.resolved().unwrap_or("unresolved")
        )
    }
}

/// Marker source standing in as the origin of values that were never found.
#[derive(Debug)]
struct NonexistentSource;

impl Source for NonexistentSource {
    fn kind(&self) -> &'static str {
        "nonexistent"
    }

    fn declared(&self) -> &str {
        "nonexistent"
    }

    fn resolved(&self) -> Option<&str> {
        None
    }

    fn load(&self) -> Result<HashMap<String, String>, ConfigError> {
        Err(ConfigError::NonexistentLocation)
    }
}

static NONEXISTENT: Lazy<Arc<dyn Source>> = Lazy::new(|| Arc::new(NonexistentSource));

/// Returns the well-known sentinel source.
///
/// It is a marker, not a real source: calling [`Source::load`] on it
/// always fails with [`ConfigError::NonexistentLocation`].
pub fn nonexistent_source() -> Arc<dyn Source> {
    Arc::clone(&NONEXISTENT)
}
