//! Layered configuration loading and resolution.

mod builder;
mod error;
mod file;
mod properties;
mod resolve;
mod resource;
mod source;
mod value;

pub use builder::ConfigBuilder;
pub use error::ConfigError;
pub use file::FileSource;
pub use resolve::Config;
pub use resource::{register_resource, ResourceSource};
pub use source::{nonexistent_source, Source};
pub use value::Value;
