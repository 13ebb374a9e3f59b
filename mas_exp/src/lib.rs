#![deny(rust_2018_idioms)]

pub mod error;
pub mod experiment;
pub mod merge;
pub mod metric;

// Re-exports.
pub use error::ExpError;
pub use experiment::{
    reshape, MetricRecord, PivotedExperiment, RawExperiment,
};
pub use merge::merge;
pub use metric::Metric;

use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum SerializationFormat {
    Json,
    JsonPretty,
}

/// Installs the global tracing subscriber. The filter is read from
/// `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn serialize<T>(
    data: T,
    file: impl AsRef<Path>,
    format: SerializationFormat,
) -> Result<(), ExpError>
where
    T: serde::Serialize,
{
    let path = file.as_ref();
    let io_error = |source| ExpError::Io {
        path: path.to_path_buf(),
        source,
    };
    // if the file does not exist it will be created, otherwise truncated
    let file = std::fs::File::create(path).map_err(io_error)?;
    // create a buf writer
    let mut buf = std::io::BufWriter::new(file);
    // and try to serialize
    let result = match format {
        SerializationFormat::Json => serde_json::to_writer(&mut buf, &data),
        SerializationFormat::JsonPretty => {
            serde_json::to_writer_pretty(&mut buf, &data)
        }
    };
    result.map_err(|e| io_error(e.into()))?;
    // errors on the last buffered write only show up here
    buf.flush().map_err(io_error)
}

pub fn deserialize<T>(file: impl AsRef<Path>) -> Result<T, ExpError>
where
    T: serde::de::DeserializeOwned,
{
    let path = file.as_ref();
    // open the file in read-only
    let file = std::fs::File::open(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ExpError::FileNotFound(path.to_path_buf())
        } else {
            ExpError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    // create a buf reader
    let buf = std::io::BufReader::new(file);
    // and try to deserialize
    serde_json::from_reader(buf).map_err(|source| ExpError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a result file and pivots it by configuration.
pub fn load_pivoted(
    file: impl AsRef<Path>,
) -> Result<PivotedExperiment, ExpError> {
    let raw: RawExperiment = deserialize(file)?;
    reshape(raw)
}
