use crate::error::ExpError;
use std::fmt;
use std::str::FromStr;

/// Metrics recorded by the simulator for each (configuration, resource) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    TotalDistance,
    PickupTardiness,
    DeliveryTardiness,
    SimulationTime,
    OverTime,
    // Gendreau objective function components
    GTardiness,
    GOverTime,
    GTravelTime,
    GCost,
}

impl Metric {
    pub const BASIC: [Metric; 5] = [
        Metric::DeliveryTardiness,
        Metric::OverTime,
        Metric::PickupTardiness,
        Metric::SimulationTime,
        Metric::TotalDistance,
    ];

    pub const GENDREAU: [Metric; 4] = [
        Metric::GCost,
        Metric::GOverTime,
        Metric::GTardiness,
        Metric::GTravelTime,
    ];

    pub const ALL: [Metric; 9] = [
        Metric::TotalDistance,
        Metric::PickupTardiness,
        Metric::DeliveryTardiness,
        Metric::SimulationTime,
        Metric::OverTime,
        Metric::GTardiness,
        Metric::GOverTime,
        Metric::GTravelTime,
        Metric::GCost,
    ];

    /// Key under which this metric is stored in the result files.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::TotalDistance => "totalDistance",
            Metric::PickupTardiness => "pickupTardiness",
            Metric::DeliveryTardiness => "deliveryTardiness",
            Metric::SimulationTime => "simulationTime",
            Metric::OverTime => "overTime",
            Metric::GTardiness => "gTardiness",
            Metric::GOverTime => "gOverTime",
            Metric::GTravelTime => "gTravelTime",
            Metric::GCost => "gCost",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::TotalDistance => "Comparison of total distance traveled",
            Metric::PickupTardiness => {
                "Comparison of amount of pickup tardiness"
            }
            Metric::DeliveryTardiness => {
                "Comparison of amount of delivery tardiness"
            }
            Metric::SimulationTime => {
                "Comparison of time needed to complete scenario"
            }
            Metric::OverTime => "Comparison of amount of cumulative overtime",
            Metric::GTardiness => {
                "Tardiness in minutes according to Gendreau obj. function"
            }
            Metric::GOverTime => {
                "Overtime in minutes according to Gendreau obj. function"
            }
            Metric::GTravelTime => {
                "Traveltime in minutes according to Gendreau obj. function"
            }
            Metric::GCost => "Computed value of the Gendreau obj. function",
        }
    }

    pub fn ylabel(&self) -> &'static str {
        match self {
            Metric::GTardiness => "Tardiness",
            Metric::GOverTime => "Overtime",
            Metric::GTravelTime => "Travel time",
            Metric::GCost => "Cost",
            // the simulation metrics are labeled with their raw name
            metric => metric.name(),
        }
    }

    pub fn is_gendreau(&self) -> bool {
        Self::GENDREAU.contains(self)
    }

    /// Parses a comma-separated list of metric names.
    pub fn parse_list(list: &str) -> Result<Vec<Metric>, ExpError> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Metric::from_str)
            .collect()
    }
}

impl FromStr for Metric {
    type Err = ExpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|metric| metric.name() == s)
            .ok_or_else(|| ExpError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.name().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn unknown_metric() {
        match "latency".parse::<Metric>() {
            Err(ExpError::UnknownMetric(name)) => assert_eq!(name, "latency"),
            other => panic!("expected unknown metric, got {:?}", other),
        }
    }

    #[test]
    fn basic_metrics_are_sorted_by_name() {
        let names: Vec<_> = Metric::BASIC.iter().map(Metric::name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn gendreau_subset() {
        assert!(Metric::GCost.is_gendreau());
        assert!(!Metric::OverTime.is_gendreau());
        assert_eq!(
            Metric::ALL.iter().filter(|m| m.is_gendreau()).count(),
            Metric::GENDREAU.len()
        );
    }

    #[test]
    fn parse_list() {
        let metrics = Metric::parse_list("gOverTime, gCost,").unwrap();
        assert_eq!(metrics, vec![Metric::GOverTime, Metric::GCost]);
        assert!(Metric::parse_list("gOverTime,nope").is_err());
    }
}
