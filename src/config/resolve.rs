//! Layered resolution over an ordered list of sources.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, trace};

use super::source::Source;
use super::value::Value;
use super::ConfigError;

/// The merged, immutable view over an ordered sequence of sources.
///
/// Later sources override earlier ones on a per-key basis. Sources that
/// failed to load are omitted entirely. Immutable after construction and
/// safe for unsynchronized concurrent reads.
pub struct Config {
    layers: Vec<(Arc<dyn Source>, HashMap<String, String>)>,
    created_at: SystemTime,
}

impl Config {
    /// Loads every source in order, skipping individual failures.
    ///
    /// Fails with [`ConfigError::NoUsableLocation`], naming all attempted
    /// locations, only when no source at all could be loaded.
    pub(crate) fn from_sources(sources: Vec<Arc<dyn Source>>) -> Result<Self, ConfigError> {
        let mut layers = Vec::with_capacity(sources.len());

        for source in &sources {
            match source.load() {
                Ok(entries) => {
                    debug!("loaded config from {}", source.description());
                    layers.push((Arc::clone(source), entries));
                }
                Err(err) => {
                    debug!(
                        "could not load config from location {}: {}",
                        source.description(),
                        err
                    );
                }
            }
        }

        if layers.is_empty() {
            let attempted = sources
                .iter()
                .map(|s| s.description())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigError::NoUsableLocation { attempted });
        }

        Ok(Self {
            layers,
            created_at: SystemTime::now(),
        })
    }

    /// Resolves `key` against the layered sources.
    ///
    /// Scans the loaded sources in declaration order and keeps the last
    /// hit, so the value from the last source defining the key wins. Always
    /// returns a [`Value`]; an undefined key yields an absent one.
    pub fn key(&self, key: &str) -> Value {
        let mut winner: Option<(&Arc<dyn Source>, &str)> = None;

        for (source, entries) in &self.layers {
            match entries.get(key) {
                Some(raw) => {
                    trace!("key {} found in location {}", key, source.description());
                    winner = Some((source, raw));
                }
                None => {
                    trace!("key {} not found in location {}", key, source.description());
                }
            }
        }

        match winner {
            Some((source, raw)) => Value::present(raw, Arc::clone(source)),
            None => Value::absent(),
        }
    }

    /// The loaded (source, mapping) pairs, in declaration order.
    pub fn layers(
        &self,
    ) -> impl Iterator<Item = (&Arc<dyn Source>, &HashMap<String, String>)> {
        self.layers.iter().map(|(source, entries)| (source, entries))
    }

    /// Timestamp captured at the end of construction.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, entries) in &self.layers {
            write!(f, "{}(", source.description())?;
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "); ")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("layers", &self.layers.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resource::{register_resource, ResourceSource};

    fn resource_sources(specs: &[(&str, &str)]) -> Vec<Arc<dyn Source>> {
        specs
            .iter()
            .map(|(name, contents)| {
                register_resource(*name, *contents);
                Arc::new(ResourceSource::new(*name)) as Arc<dyn Source>
            })
            .collect()
    }

    #[test]
    fn test_last_source_wins_per_key() {
        let sources = resource_sources(&[
            ("resolve-a", "key1 = value1\n"),
            ("resolve-b", "key1 = value1-2\nkey2 = value2\n"),
        ]);
        let config = Config::from_sources(sources).unwrap();

        assert_eq!(config.key("key1").as_str().unwrap(), "value1-2");
        assert_eq!(config.key("key2").as_str().unwrap(), "value2");

        let origin = config.key("key1").loaded_from();
        assert!(origin.description().contains("resolve-b"));

        let origin = config.key("key2").loaded_from();
        assert!(origin.description().contains("resolve-b"));
    }

    #[test]
    fn test_undefined_key_is_absent_not_error() {
        let sources = resource_sources(&[("resolve-absent", "key1 = value1\n")]);
        let config = Config::from_sources(sources).unwrap();

        let value = config.key("keydoesnotexist");
        assert!(!value.exists());
        assert!(matches!(value.as_str(), Err(ConfigError::Missing)));
        assert_eq!(value.as_str_or("D"), "D");
        assert!(matches!(
            value.loaded_from().load(),
            Err(ConfigError::NonexistentLocation)
        ));
    }

    #[test]
    fn test_failed_source_is_skipped() {
        register_resource("resolve-valid", "key1 = value1\n");
        let sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(ResourceSource::new("resolve-valid")),
            Arc::new(ResourceSource::new("resolve-not-registered")),
        ];
        let config = Config::from_sources(sources).unwrap();

        assert_eq!(config.layers().count(), 1);
        assert_eq!(config.key("key1").as_str().unwrap(), "value1");
    }

    #[test]
    fn test_all_sources_failing_is_fatal() {
        let sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(ResourceSource::new("resolve-missing-1")),
            Arc::new(ResourceSource::new("resolve-missing-2")),
        ];
        let result = Config::from_sources(sources);

        match result {
            Err(ConfigError::NoUsableLocation { attempted }) => {
                assert!(attempted.contains("resolve-missing-1"));
                assert!(attempted.contains("resolve-missing-2"));
            }
            other => panic!("expected NoUsableLocation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_display_omits_failed_sources() {
        let sources = resource_sources(&[("resolve-shown", "key1 = value1\n")]);
        let mut sources = sources;
        sources.push(Arc::new(ResourceSource::new("resolve-hidden")));
        let config = Config::from_sources(sources).unwrap();

        let rendered = config.to_string();
        assert!(rendered.contains("resolve-shown"));
        assert!(rendered.contains("key1=value1"));
        assert!(!rendered.contains("resolve-hidden"));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let sources = resource_sources(&[("resolve-repeat", "key1 = value1\n")]);
        let config = Config::from_sources(sources).unwrap();

        for _ in 0..3 {
            assert_eq!(config.key("key1").as_str().unwrap(), "value1");
        }
    }

    #[test]
    fn test_creation_time_is_bracketed() {
        let sources = resource_sources(&[("resolve-time", "key1 = value1\n")]);

        let before = SystemTime::now();
        let config = Config::from_sources(sources).unwrap();
        let after = SystemTime::now();

        assert!(before <= config.created_at());
        assert!(config.created_at() <= after);
    }
}
