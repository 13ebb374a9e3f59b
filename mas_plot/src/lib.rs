#![deny(rust_2018_idioms)]

pub mod color;
pub mod db;
pub mod error;
pub mod fmt;
pub mod layout;
#[cfg(feature = "pyo3")]
pub mod plot;

// Re-exports.
pub use db::{ResultsDB, Search};
pub use error::PlotError;
pub use fmt::{LegendPlacement, OutputFormat, PlotFmt};
pub use layout::{compute_layout, Bar, LayoutPlan, Shading};

#[cfg(feature = "pyo3")]
pub use render::{bar_plot, end_plot, start_plot};

/// Unwraps a `PyResult`, printing the python traceback and returning a
/// `Report` on error.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(v) => v,
            Err(e) => {
                e.print($py);
                return Err(color_eyre::eyre::eyre!("python error: {}", e));
            }
        }
    }};
}

/// Builds a python `dict` from `(key, value)` pairs.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pydict {
    ($py:expr, $($tup:expr),* $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            let (key, value) = $tup;
            $crate::pytry!($py, dict.set_item(key, value));
        )*
        dict
    }};
}

#[cfg(feature = "pyo3")]
mod render {
    use crate::fmt::{LegendPlacement, PlotFmt};
    use crate::layout::LayoutPlan;
    use crate::plot::axes::Axes;
    use crate::plot::figure::Figure;
    use crate::plot::pyplot::PyPlot;
    use crate::{pydict, pytry};
    use color_eyre::eyre::WrapErr;
    use color_eyre::Report;
    use mas_exp::Metric;
    use pyo3::prelude::*;
    use std::path::Path;

    // matplotlib skips labels starting with an underscore in the legend
    const NO_LEGEND: &str = "_nolegend_";

    pub fn start_plot<'a>(
        py: Python<'_>,
        plt: &'a PyPlot<'_>,
    ) -> Result<(Figure<'a>, Axes<'a>), Report> {
        let kwargs = pydict!(py, ("figsize", (8, 5)));
        let (fig, ax) = pytry!(py, plt.subplots(Some(kwargs)));
        Ok((fig, ax))
    }

    pub fn end_plot(
        py: Python<'_>,
        plt: &PyPlot<'_>,
        fig: Figure<'_>,
        fmt: &PlotFmt,
        output_file: &Path,
    ) -> Result<(), Report> {
        match fmt.legend {
            LegendPlacement::Best => {
                pytry!(py, fig.tight_layout());
            }
            LegendPlacement::Below { .. } => {
                // leave room under the axes for the legend
                let kwargs = pydict!(
                    py,
                    ("top", 0.95),
                    ("bottom", 0.16),
                    ("left", 0.1),
                    ("right", 0.99),
                );
                pytry!(py, fig.subplots_adjust(Some(kwargs)));
            }
        }

        if let Some(dir) = output_file.parent() {
            std::fs::create_dir_all(dir).wrap_err_with(|| {
                format!("create output directory {}", dir.display())
            })?;
        }
        let path = output_file.display().to_string();
        let kwargs = pydict!(py, ("format", fmt.format.extension()));
        pytry!(py, plt.savefig(&path, Some(kwargs)));
        pytry!(py, plt.close(fig));
        tracing::info!("{} written", path);
        Ok(())
    }

    fn add_legend(
        py: Python<'_>,
        ax: &Axes<'_>,
        legend: LegendPlacement,
    ) -> Result<(), Report> {
        let kwargs = match legend {
            LegendPlacement::Best => pydict!(py, ("loc", "best")),
            LegendPlacement::Below { ncol, fontsize } => pydict!(
                py,
                ("loc", "upper center"),
                ("bbox_to_anchor", (0.5, -0.13)),
                ("ncol", ncol),
                ("prop", pydict!(py, ("size", fontsize))),
            ),
        };
        pytry!(py, ax.legend(Some(kwargs)));
        Ok(())
    }

    /// Renders `plan` as a bar chart of `metric` into `output_file`.
    pub fn bar_plot(
        plan: &LayoutPlan,
        metric: Metric,
        fmt: &PlotFmt,
        output_file: &Path,
    ) -> Result<(), Report> {
        Python::with_gil(|py| {
            let plt = pytry!(py, PyPlot::new(py));
            let (fig, ax) = start_plot(py, &plt)?;

            for bar in &plan.bars {
                let label = bar.label.as_deref().unwrap_or(NO_LEGEND);
                let kwargs = pydict!(
                    py,
                    ("width", plan.bar_width),
                    ("alpha", bar.opacity),
                    ("color", bar.color.as_tuple()),
                    ("label", label),
                );
                pytry!(
                    py,
                    ax.bar(vec![bar.position], vec![bar.value], Some(kwargs))
                );
                tracing::trace!(
                    "{} #{} at {:.3}: {}",
                    bar.configuration,
                    bar.resource_index,
                    bar.position,
                    bar.value
                );
            }

            // set labels
            pytry!(py, ax.set_xlabel(fmt.xlabel));
            pytry!(py, ax.set_ylabel(metric.ylabel()));
            pytry!(py, ax.set_title(metric.title()));

            // set xticks, centered under each resource
            pytry!(py, ax.set_xticks(plan.ticks.clone()));
            let kwargs = pydict!(py, ("rotation", fmt.tick_rotation));
            if let Some(fontsize) = fmt.tick_fontsize {
                pytry!(py, kwargs.set_item("fontsize", fontsize));
            }
            pytry!(
                py,
                ax.set_xticklabels(plan.tick_labels.clone(), Some(kwargs))
            );

            add_legend(py, &ax, fmt.legend)?;
            end_plot(py, &plt, fig, fmt, output_file)
        })
    }
}

#[cfg(all(test, feature = "pyo3"))]
mod tests {
    use super::*;
    use mas_exp::Metric;

    #[test]
    fn bar_plot_writes_file() {
        let plan = compute_layout(
            &["greedy", "early simple"],
            &["req_rapide_1_240_24", "req_rapide_2_240_24"],
            Some(1),
            PlotFmt::grouped().shading,
            11,
            |_, resource| Ok(resource.len() as f64),
        )
        .unwrap();

        let dir = std::env::temp_dir().join("mas_plot_render_test");
        for fmt in [PlotFmt::overview(), PlotFmt::grouped()] {
            let path = fmt.output_file(&dir, "test.json", Metric::GCost);
            if let Err(e) = bar_plot(&plan, Metric::GCost, &fmt, &path) {
                panic!("error while plotting: {:?}", e);
            }
            // check that the file was indeed created
            assert!(path.is_file());
            std::fs::remove_file(&path).unwrap();
        }
    }
}
