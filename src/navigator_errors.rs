use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Unknown viewing mode type: {0} (expected \"horizon\" or \"equator\")")]
    InvalidViewingMode(String),

    #[error("Vision vector must be finite and non-zero")]
    DegenerateVisionVector,

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to parse the configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

impl PartialEq for NavigatorError {
    fn eq(&self, other: &Self) -> bool {
        use NavigatorError::*;
        match (self, other) {
            (UnknownLocation(a), UnknownLocation(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (InvalidViewingMode(a), InvalidViewingMode(b)) => a == b,

            // io and toml errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (ConfigParseError(_), ConfigParseError(_)) => true,

            (DegenerateVisionVector, DegenerateVisionVector) => true,

            _ => false,
        }
    }
}
