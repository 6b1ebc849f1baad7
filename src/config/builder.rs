use std::path::Path;
use std::sync::Arc;

use super::file::FileSource;
use super::resolve::Config;
use super::resource::ResourceSource;
use super::source::Source;
use super::ConfigError;

/// Builder for a [`Config`] layered from filesystem and resource sources.
///
/// Sources are accumulated in call order; the first one provides defaults
/// and each following one overrides earlier definitions per key. A `None`
/// location is silently skipped, so optional override layers can be wired
/// unconditionally:
///
/// ```no_run
/// use propstack::ConfigBuilder;
///
/// let local_override = std::env::var("APP_CONFIG").ok();
/// let config = ConfigBuilder::default_from_resource(Some("defaults.properties"))
///     .override_from_file(local_override)
///     .load()?;
///
/// let port = config.key("port").as_i64_or(8080)?;
/// # Ok::<(), propstack::ConfigError>(())
/// ```
///
/// The builder is a single-threaded value: chain methods consume and return
/// it, so it cannot be mutated concurrently. [`load`](ConfigBuilder::load)
/// does not consume the accumulated list and may be called repeatedly; each
/// call produces a fresh [`Config`] snapshot.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .load() is called"]
pub struct ConfigBuilder {
    sources: Vec<Arc<dyn Source>>,
}

impl ConfigBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder whose default layer is a filesystem properties file.
    ///
    /// `None` is a no-op, yielding an empty builder.
    pub fn default_from_file<P: AsRef<Path>>(path: Option<P>) -> Self {
        Self::new().override_from_file(path)
    }

    /// Starts a builder whose default layer is a registered resource.
    ///
    /// `None` is a no-op, yielding an empty builder.
    pub fn default_from_resource(name: Option<&str>) -> Self {
        Self::new().override_from_resource(name)
    }

    /// Adds a filesystem properties file as an overriding layer.
    pub fn override_from_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.sources.push(Arc::new(FileSource::new(path)));
        }
        self
    }

    /// Adds a registered resource as an overriding layer.
    pub fn override_from_resource(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.sources.push(Arc::new(ResourceSource::new(name)));
        }
        self
    }

    /// Loads every accumulated source, in order, into a fresh [`Config`].
    ///
    /// Individual sources failing to load are skipped; fails only if none
    /// could be loaded at all.
    pub fn load(&self) -> Result<Config, ConfigError> {
        Config::from_sources(self.sources.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resource::register_resource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_none_locations_are_skipped() {
        let builder = ConfigBuilder::default_from_file(None::<&str>)
            .override_from_resource(None)
            .override_from_file(None::<&str>);

        assert!(matches!(
            builder.load(),
            Err(ConfigError::NoUsableLocation { .. })
        ));
    }

    #[test]
    fn test_single_failing_location_is_fatal() {
        let builder = ConfigBuilder::default_from_resource(Some("builder-not-registered"));
        assert!(matches!(
            builder.load(),
            Err(ConfigError::NoUsableLocation { .. })
        ));
    }

    #[test]
    fn test_one_valid_location_suffices() {
        register_resource("builder-valid", "key1 = value1\n");

        let config = ConfigBuilder::default_from_resource(Some("builder-valid"))
            .override_from_file(Some("/nonexistent/override.properties"))
            .load()
            .unwrap();

        assert_eq!(config.key("key1").as_str().unwrap(), "value1");
    }

    #[test]
    fn test_override_order_spans_source_kinds() {
        register_resource("builder-defaults", "key1 = value1\nkey2 = value2\n");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "key6 = value6\nkey1  : value1-3\n").unwrap();

        let config = ConfigBuilder::default_from_resource(Some("builder-defaults"))
            .override_from_file(Some(file.path()))
            .load()
            .unwrap();

        assert_eq!(config.key("key1").as_str_or("default"), "value1-3");
        assert_eq!(config.key("key2").as_str_or("default"), "value2");
        assert_eq!(config.key("key6").as_str_or("default"), "value6");
        assert_eq!(config.key("key5").as_str_or("default"), "default");

        assert!(config
            .key("key1")
            .loaded_from()
            .description()
            .starts_with("filesystem:"));
        assert!(config
            .key("key2")
            .loaded_from()
            .description()
            .starts_with("resource:"));
    }

    #[test]
    fn test_earlier_file_is_overridden_by_later_resource() {
        register_resource("builder-top", "key1 = value1-2\n");

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "key1 = value1\nkey6 = value6\n").unwrap();

        let config = ConfigBuilder::default_from_file(Some(file.path()))
            .override_from_resource(Some("builder-top"))
            .load()
            .unwrap();

        assert_eq!(config.key("key1").as_str().unwrap(), "value1-2");
        assert_eq!(config.key("key6").as_str().unwrap(), "value6");
    }

    #[test]
    fn test_load_is_repeatable_without_consuming() {
        register_resource("builder-repeat", "key1 = value1\n");

        let builder = ConfigBuilder::default_from_resource(Some("builder-repeat"));
        let first = builder.load().unwrap();
        let second = builder.load().unwrap();

        assert_eq!(first.key("key1").as_str().unwrap(), "value1");
        assert_eq!(second.key("key1").as_str().unwrap(), "value1");
    }

    #[test]
    fn test_malformed_number_with_default_still_fails() {
        register_resource("builder-malformed", "key1 = value1\nlongKey1 = -30\n");

        let config = ConfigBuilder::default_from_resource(Some("builder-malformed"))
            .load()
            .unwrap();

        assert_eq!(config.key("longKey1").as_i64_or(9999).unwrap(), -30);
        assert!(matches!(
            config.key("key1").as_i64_or(42),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            config.key("key1").as_i64(),
            Err(ConfigError::Malformed { .. })
        ));
    }
}
