use crate::error::ExpError;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Metric name to value, as written by the simulator.
pub type MetricRecord = BTreeMap<String, f64>;

/// Results as stored on disk: resource -> configuration -> record.
///
/// Ordered maps are used on purpose: every consumer iterates resources and
/// configurations sorted by name, and colors are assigned by that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawExperiment {
    resources: BTreeMap<String, BTreeMap<String, MetricRecord>>,
}

impl RawExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        resource: impl Into<String>,
        configuration: impl Into<String>,
        record: MetricRecord,
    ) {
        self.resources
            .entry(resource.into())
            .or_default()
            .insert(configuration.into(), record);
    }

    pub fn get(
        &self,
        resource: &str,
    ) -> Option<&BTreeMap<String, MetricRecord>> {
        self.resources.get(resource)
    }

    pub fn resources(&self) -> impl Iterator<Item = &String> {
        self.resources.keys()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn iter(
        &self,
    ) -> btree_map::Iter<'_, String, BTreeMap<String, MetricRecord>> {
        self.resources.iter()
    }

    pub(crate) fn into_inner(
        self,
    ) -> BTreeMap<String, BTreeMap<String, MetricRecord>> {
        self.resources
    }

    pub(crate) fn from_inner(
        resources: BTreeMap<String, BTreeMap<String, MetricRecord>>,
    ) -> Self {
        Self { resources }
    }

    /// Checks that the configuration x resource grid is rectangular: there is
    /// at least one resource, and every resource was run under exactly the
    /// same (non-empty) set of configurations.
    pub fn validate(&self) -> Result<(), ExpError> {
        let mut resources = self.resources.iter();
        let (_, first) = resources
            .next()
            .ok_or(ExpError::EmptyInput("resources"))?;
        if first.is_empty() {
            return Err(ExpError::EmptyInput("configurations"));
        }
        let expected: Vec<_> = first.keys().cloned().collect();

        for (resource, configurations) in resources {
            let same = configurations.len() == expected.len()
                && configurations.keys().zip(&expected).all(|(a, b)| a == b);
            if !same {
                return Err(ExpError::ShapeMismatch {
                    resource: resource.clone(),
                    expected,
                    found: configurations.keys().cloned().collect(),
                });
            }
        }
        Ok(())
    }
}

/// Results indexed the other way around: configuration -> resource -> record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PivotedExperiment {
    configurations: BTreeMap<String, BTreeMap<String, MetricRecord>>,
}

impl PivotedExperiment {
    /// Configuration names, sorted.
    pub fn configurations(&self) -> Vec<&str> {
        self.configurations.keys().map(String::as_str).collect()
    }

    /// Resource names, sorted. The grid is rectangular, so the resources of
    /// any configuration are the resources of all of them.
    pub fn resources(&self) -> Vec<&str> {
        self.configurations
            .values()
            .next()
            .map(|resources| resources.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, configuration: &str) -> bool {
        self.configurations.contains_key(configuration)
    }

    pub fn record(
        &self,
        configuration: &str,
        resource: &str,
    ) -> Option<&MetricRecord> {
        self.configurations
            .get(configuration)
            .and_then(|resources| resources.get(resource))
    }

    pub fn value(
        &self,
        configuration: &str,
        resource: &str,
        metric: &str,
    ) -> Result<f64, ExpError> {
        self.record(configuration, resource)
            .and_then(|record| record.get(metric))
            .copied()
            .ok_or_else(|| ExpError::MissingMetric {
                configuration: configuration.to_string(),
                resource: resource.to_string(),
                metric: metric.to_string(),
            })
    }

    /// Metric names present in any record, sorted.
    pub fn metric_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .configurations
            .values()
            .flat_map(|resources| resources.values())
            .flat_map(|record| record.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn iter(
        &self,
    ) -> btree_map::Iter<'_, String, BTreeMap<String, MetricRecord>> {
        self.configurations.iter()
    }

    /// Transposes back into the on-disk layout.
    pub fn unpivot(self) -> RawExperiment {
        let resources = transpose(self.configurations);
        RawExperiment::from_inner(resources)
    }
}

/// Re-indexes `raw` by configuration. Fails on empty or ragged input rather
/// than silently producing a partial table.
pub fn reshape(raw: RawExperiment) -> Result<PivotedExperiment, ExpError> {
    raw.validate()?;
    let configurations = transpose(raw.into_inner());
    Ok(PivotedExperiment { configurations })
}

fn transpose(
    outer: BTreeMap<String, BTreeMap<String, MetricRecord>>,
) -> BTreeMap<String, BTreeMap<String, MetricRecord>> {
    outer
        .into_iter()
        .flat_map(|(outer_key, inner)| {
            inner.into_iter().map(move |(inner_key, record)| {
                (inner_key, outer_key.clone(), record)
            })
        })
        .fold(BTreeMap::new(), |mut acc, (inner_key, outer_key, record)| {
            acc.entry(inner_key)
                .or_insert_with(BTreeMap::new)
                .insert(outer_key, record);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn record(entries: &[(&str, f64)]) -> MetricRecord {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn sample() -> RawExperiment {
        let mut raw = RawExperiment::new();
        raw.insert("req_rapide_1_240_24", "greedy", record(&[("gCost", 1.0)]));
        raw.insert("req_rapide_1_240_24", "early", record(&[("gCost", 2.0)]));
        raw.insert("req_rapide_2_240_24", "greedy", record(&[("gCost", 3.0)]));
        raw.insert("req_rapide_2_240_24", "early", record(&[("gCost", 4.0)]));
        raw
    }

    #[test]
    fn reshape_indexes_by_configuration() {
        let pivoted = reshape(sample()).unwrap();
        assert_eq!(pivoted.configurations(), vec!["early", "greedy"]);
        assert_eq!(
            pivoted.resources(),
            vec!["req_rapide_1_240_24", "req_rapide_2_240_24"]
        );
        assert_eq!(
            pivoted.value("early", "req_rapide_2_240_24", "gCost").unwrap(),
            4.0
        );
        assert_eq!(
            pivoted.value("greedy", "req_rapide_1_240_24", "gCost").unwrap(),
            1.0
        );
    }

    #[test]
    fn reshape_rejects_empty_input() {
        assert!(matches!(
            reshape(RawExperiment::new()),
            Err(ExpError::EmptyInput("resources"))
        ));

        let mut raw = RawExperiment::new();
        raw.resources.insert("r1".to_string(), BTreeMap::new());
        assert!(matches!(
            reshape(raw),
            Err(ExpError::EmptyInput("configurations"))
        ));
    }

    #[test]
    fn reshape_rejects_ragged_input() {
        let mut raw = sample();
        raw.insert("req_rapide_3_240_24", "greedy", record(&[("gCost", 5.0)]));
        match reshape(raw) {
            Err(ExpError::ShapeMismatch {
                resource,
                expected,
                found,
            }) => {
                assert_eq!(resource, "req_rapide_3_240_24");
                assert_eq!(expected, vec!["early", "greedy"]);
                assert_eq!(found, vec!["greedy"]);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn missing_metric() {
        let pivoted = reshape(sample()).unwrap();
        assert!(matches!(
            pivoted.value("early", "req_rapide_1_240_24", "overTime"),
            Err(ExpError::MissingMetric { .. })
        ));
        assert!(pivoted.value("bogus", "req_rapide_1_240_24", "gCost").is_err());
    }

    #[test]
    fn metric_names_are_deduplicated() {
        let mut raw = RawExperiment::new();
        raw.insert("r1", "a", record(&[("x", 1.0), ("y", 2.0)]));
        raw.insert("r2", "a", record(&[("y", 3.0), ("z", 4.0)]));
        let pivoted = reshape(raw).unwrap();
        assert_eq!(pivoted.metric_names(), vec!["x", "y", "z"]);
    }

    #[test]
    fn json_shape() {
        let json = r#"{"r1": {"A": {"x": 1}, "B": {"x": 2.5}}}"#;
        let raw: RawExperiment = serde_json::from_str(json).unwrap();
        let pivoted = reshape(raw).unwrap();
        let json = serde_json::to_value(&pivoted).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"A": {"r1": {"x": 1.0}}, "B": {"r1": {"x": 2.5}}})
        );
    }

    #[quickcheck]
    fn unpivot_inverts_reshape(
        resources: Vec<String>,
        configurations: Vec<String>,
        value: f64,
    ) -> TestResult {
        if resources.is_empty() || configurations.is_empty() || value.is_nan()
        {
            return TestResult::discard();
        }

        let mut raw = RawExperiment::new();
        for (i, resource) in resources.iter().enumerate() {
            for (j, configuration) in configurations.iter().enumerate() {
                let value = value + (i * configurations.len() + j) as f64;
                raw.insert(
                    resource.clone(),
                    configuration.clone(),
                    record(&[("gCost", value)]),
                );
            }
        }

        let pivoted = reshape(raw.clone()).unwrap();
        let twice = reshape(pivoted.clone().unpivot()).unwrap();
        TestResult::from_bool(
            pivoted.clone().unpivot() == raw && twice == pivoted,
        )
    }
}
