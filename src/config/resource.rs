//! Resource-based configuration source.
//!
//! Resources are named blobs of properties text registered once by the
//! application, typically `include_str!` payloads embedded in the binary.
//! They play the role of bundled defaults that filesystem sources override.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use once_cell::sync::Lazy;

use super::properties;
use super::source::Source;
use super::ConfigError;

static REGISTRY: Lazy<RwLock<HashMap<String, String>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a named resource for later lookup by a [`ResourceSource`].
///
/// Registering the same name again replaces the previous contents.
pub fn register_resource(name: impl Into<String>, contents: impl Into<String>) {
    REGISTRY
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(name.into(), contents.into());
}

fn lookup(name: &str) -> Option<String> {
    REGISTRY
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(name)
        .cloned()
}

/// A configuration source that resolves its declared name through the
/// application-wide resource registry.
#[derive(Debug)]
pub struct ResourceSource {
    name: String,
    resolved: OnceLock<String>,
}

impl ResourceSource {
    /// Creates a new source for the given registered resource name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: OnceLock::new(),
        }
    }
}

impl Source for ResourceSource {
    fn kind(&self) -> &'static str {
        "resource"
    }

    fn declared(&self) -> &str {
        &self.name
    }

    fn resolved(&self) -> Option<&str> {
        self.resolved.get().map(String::as_str)
    }

    fn load(&self) -> Result<HashMap<String, String>, ConfigError> {
        let text =
            lookup(&self.name).ok_or_else(|| ConfigError::ResourceNotFound(self.name.clone()))?;
        let entries = properties::parse(&text, &self.name)?;

        let _ = self.resolved.set(format!("resource:{}", self.name));
        Ok(entries)
    }
}
