pub mod config;

pub use config::{
    nonexistent_source, register_resource, Config, ConfigBuilder, ConfigError, FileSource,
    ResourceSource, Source, Value,
};
