use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("value does not exist")]
    Missing,

    #[error("cannot parse '{raw}' as {target}")]
    Malformed { raw: String, target: &'static str },

    #[error("failed to read '{location}': {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    #[error("could not resolve resource '{0}'")]
    ResourceNotFound(String),

    #[error("malformed escape sequence at line {line} of '{location}'")]
    Parse { location: String, line: usize },

    #[error("cannot load from nonexistent location")]
    NonexistentLocation,

    #[error("unable to load configuration data from any location ({attempted})")]
    NoUsableLocation { attempted: String },
}
