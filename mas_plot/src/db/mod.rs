mod results_db;

// Re-exports.
pub use results_db::ResultsDB;

use mas_exp::Metric;

/// What to chart from a `ResultsDB`.
#[derive(Clone, Debug)]
pub struct Search {
    pub metric: Metric,
    configurations: Option<Vec<String>>,
    scenario_group_size: Option<usize>,
}

impl Search {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            configurations: None,
            scenario_group_size: None,
        }
    }

    /// Only chart these configurations, in this order. Without it, every
    /// configuration is charted, sorted by name.
    pub fn configurations<I, S>(&mut self, configurations: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configurations =
            Some(configurations.into_iter().map(Into::into).collect());
        self
    }

    pub fn scenario_group_size(&mut self, size: usize) -> &mut Self {
        self.scenario_group_size = Some(size);
        self
    }
}
