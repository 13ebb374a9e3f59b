use crate::layout::Shading;
use mas_exp::Metric;
use std::path::{Path, PathBuf};

// resource names look like `req_rapide_1_240_24`; only the suffix is shown
const TICK_PREFIX_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendPlacement {
    /// Let matplotlib pick a spot inside the axes.
    Best,
    /// Centered under the axes, in `ncol` columns.
    Below { ncol: usize, fontsize: f64 },
}

/// Everything about a bar chart that is not data.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFmt {
    pub shading: Shading,
    pub xlabel: &'static str,
    pub tick_prefix_len: usize,
    pub tick_rotation: f64,
    pub tick_fontsize: Option<f64>,
    pub legend: LegendPlacement,
    pub format: OutputFormat,
}

impl PlotFmt {
    /// One chart per metric with every configuration side by side.
    pub fn overview() -> Self {
        Self {
            shading: Shading {
                opacity: 0.5,
                lighten: 0.0,
            },
            xlabel: "Gendreau scenario",
            tick_prefix_len: TICK_PREFIX_LEN,
            tick_rotation: 45.0,
            tick_fontsize: None,
            legend: LegendPlacement::Best,
            format: OutputFormat::Png,
        }
    }

    /// Resources grouped by scenario, meant to be included in a paper.
    pub fn grouped() -> Self {
        Self {
            shading: Shading {
                opacity: 0.7,
                lighten: 0.3,
            },
            xlabel: "Gendreau instance",
            tick_prefix_len: TICK_PREFIX_LEN,
            tick_rotation: 30.0,
            tick_fontsize: Some(7.0),
            legend: LegendPlacement::Below {
                ncol: 4,
                fontsize: 6.0,
            },
            format: OutputFormat::Pdf,
        }
    }

    /// `<output_dir>/<input stem>_<metric>.<ext>`
    pub fn output_file(
        &self,
        output_dir: impl AsRef<Path>,
        input: impl AsRef<Path>,
        metric: Metric,
    ) -> PathBuf {
        let stem = input
            .as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        output_dir.as_ref().join(format!(
            "{}_{}.{}",
            stem,
            metric.name(),
            self.format.extension()
        ))
    }
}
