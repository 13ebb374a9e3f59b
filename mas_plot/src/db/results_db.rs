use crate::db::Search;
use crate::error::PlotError;
use crate::fmt::PlotFmt;
use crate::layout::{self, LayoutPlan};
use mas_exp::{ExpError, PivotedExperiment};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct ResultsDB {
    path: PathBuf,
    experiment: PivotedExperiment,
}

impl ResultsDB {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlotError> {
        // register load start time
        let start = std::time::Instant::now();

        let path = path.as_ref().to_path_buf();
        let experiment = mas_exp::load_pivoted(&path)?;

        tracing::info!(
            "loaded {} after {:?} | {} configurations x {} resources",
            path.display(),
            start.elapsed(),
            experiment.configurations().len(),
            experiment.resources().len(),
        );
        Ok(Self { path, experiment })
    }

    pub fn from_experiment(
        path: impl Into<PathBuf>,
        experiment: PivotedExperiment,
    ) -> Self {
        Self {
            path: path.into(),
            experiment,
        }
    }

    /// File the results were loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn experiment(&self) -> &PivotedExperiment {
        &self.experiment
    }

    /// Configurations to draw, in draw order.
    pub fn find<'a>(
        &'a self,
        search: &'a Search,
    ) -> Result<Vec<&'a str>, PlotError> {
        match &search.configurations {
            Some(configurations) => configurations
                .iter()
                .map(|configuration| {
                    if self.experiment.contains(configuration) {
                        Ok(configuration.as_str())
                    } else {
                        Err(PlotError::from(ExpError::UnknownConfiguration(
                            configuration.clone(),
                        )))
                    }
                })
                .collect(),
            None => Ok(self.experiment.configurations()),
        }
    }

    pub fn layout(
        &self,
        search: &Search,
        fmt: &PlotFmt,
    ) -> Result<LayoutPlan, PlotError> {
        let configurations = self.find(search)?;
        let resources = self.experiment.resources();
        let metric = search.metric.name();
        layout::compute_layout(
            &configurations,
            &resources,
            search.scenario_group_size,
            fmt.shading,
            fmt.tick_prefix_len,
            |configuration, resource| {
                let value =
                    self.experiment.value(configuration, resource, metric)?;
                Ok(value)
            },
        )
    }

    /// Writes the pivoted table as csv: one row per (configuration,
    /// resource), one column per metric.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let path = path.as_ref();
        let csv_error = |source| PlotError::Csv {
            path: path.display().to_string(),
            source,
        };

        let metrics = self.experiment.metric_names();
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

        let mut header = vec!["configuration", "resource"];
        header.extend(metrics.iter().copied());
        writer.write_record(&header).map_err(csv_error)?;

        for (configuration, resources) in self.experiment.iter() {
            for (resource, record) in resources {
                let mut row = vec![configuration.clone(), resource.clone()];
                row.extend(metrics.iter().map(|metric| {
                    record
                        .get(*metric)
                        .map(|value| value.to_string())
                        .unwrap_or_default()
                }));
                writer.write_record(&row).map_err(csv_error)?;
            }
        }
        writer
            .flush()
            .map_err(|e| csv_error(csv::Error::from(e)))?;
        tracing::info!("csv written to {}", path.display());
        Ok(())
    }
}
