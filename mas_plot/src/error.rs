use mas_exp::ExpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Exp(#[from] ExpError),

    #[error("cannot lay out a chart without {0}")]
    EmptyInput(&'static str),

    #[error("csv export to {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
