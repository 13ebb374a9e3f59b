use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("malformed json in {}: {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "resource {resource:?} has configurations {found:?} but {expected:?} were expected"
    )]
    ShapeMismatch {
        resource: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("no {0} to work with")]
    EmptyInput(&'static str),

    #[error("resource {resource:?} is missing from the {missing_from} input")]
    MissingKey {
        resource: String,
        missing_from: &'static str,
    },

    #[error("unknown metric {0:?}")]
    UnknownMetric(String),

    #[error("unknown configuration {0:?}")]
    UnknownConfiguration(String),

    #[error(
        "metric {metric:?} missing for configuration {configuration:?} on resource {resource:?}"
    )]
    MissingMetric {
        configuration: String,
        resource: String,
        metric: String,
    },
}
