use crate::color::{self, Rgba};
use crate::error::PlotError;

/// Opacity settings for a bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub opacity: f64,
    /// Subtracted from `opacity` for every other bar of a scenario group.
    pub lighten: f64,
}

/// One bar, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub configuration: String,
    pub resource_index: usize,
    pub position: f64,
    pub opacity: f64,
    pub color: Rgba,
    /// Only set on the first bar of each configuration.
    pub label: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub bar_width: f64,
    /// In draw order: by configuration, then by resource.
    pub bars: Vec<Bar>,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl LayoutPlan {
    pub fn bars_of<'a>(
        &'a self,
        configuration: &'a str,
    ) -> impl Iterator<Item = &'a Bar> + 'a {
        self.bars
            .iter()
            .filter(move |bar| bar.configuration == configuration)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().filter_map(|bar| bar.label.as_deref())
    }
}

/// Lays out a grouped bar chart: one group of bars per resource, one bar per
/// configuration inside each group.
///
/// `configurations` and `resources` are used in the given order; callers
/// without an explicit order should pass them sorted. When
/// `scenario_group_size` is set, consecutive resources form scenario groups
/// and every other bar is drawn lighter. `tick_prefix_len` characters are
/// stripped from each resource name to build its tick label. `value_of`
/// returns the height of the bar for a (configuration, resource) pair.
pub fn compute_layout<C, R, F>(
    configurations: &[C],
    resources: &[R],
    scenario_group_size: Option<usize>,
    shading: Shading,
    tick_prefix_len: usize,
    mut value_of: F,
) -> Result<LayoutPlan, PlotError>
where
    C: AsRef<str>,
    R: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, PlotError>,
{
    if configurations.is_empty() {
        return Err(PlotError::EmptyInput("configurations"));
    }
    if resources.is_empty() {
        return Err(PlotError::EmptyInput("resources"));
    }
    if scenario_group_size == Some(0) {
        return Err(PlotError::EmptyInput("resources per scenario group"));
    }

    let configuration_count = configurations.len();
    // one extra slot per resource leaves a gap between resource groups
    let bar_width = 1.0 / (configuration_count + 1) as f64;

    let mut bars = Vec::with_capacity(configuration_count * resources.len());
    for (conf_index, configuration) in configurations.iter().enumerate() {
        let configuration = configuration.as_ref();
        let color = color::configuration_color(conf_index, configuration_count);
        for (resource_index, resource) in resources.iter().enumerate() {
            let opacity = match scenario_group_size {
                Some(_) if resource_index % 2 == 1 => {
                    shading.opacity - shading.lighten
                }
                _ => shading.opacity,
            };
            let label = if resource_index == 0 {
                Some(configuration.to_string())
            } else {
                None
            };
            let value = value_of(configuration, resource.as_ref())?;
            bars.push(Bar {
                configuration: configuration.to_string(),
                resource_index,
                position: resource_index as f64
                    + conf_index as f64 * bar_width,
                opacity,
                color,
                label,
                value,
            });
        }
    }

    let ticks = (0..resources.len())
        .map(|index| tick_position(index, bar_width, configuration_count))
        .collect();
    let tick_labels = resources
        .iter()
        .map(|resource| tick_label(resource.as_ref(), tick_prefix_len))
        .collect();

    Ok(LayoutPlan {
        bar_width,
        bars,
        ticks,
        tick_labels,
    })
}

/// Center of the group of bars of the resource at `index`.
pub fn tick_position(
    index: usize,
    bar_width: f64,
    configuration_count: usize,
) -> f64 {
    index as f64 + bar_width * configuration_count as f64 / 2.0
}

/// Resource names share a long common prefix (e.g. `req_rapide_`); drop it.
pub fn tick_label(resource: &str, prefix_len: usize) -> String {
    resource.chars().skip(prefix_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const SHADING: Shading = Shading {
        opacity: 0.7,
        lighten: 0.3,
    };

    fn names(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{}{}", prefix, i)).collect()
    }

    fn layout(
        configurations: &[&str],
        resources: &[&str],
        scenario_group_size: Option<usize>,
    ) -> Result<LayoutPlan, PlotError> {
        compute_layout(
            configurations,
            resources,
            scenario_group_size,
            SHADING,
            0,
            |_, _| Ok(1.0),
        )
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn two_by_two() {
        let plan = layout(&["A", "B"], &["res1", "res2"], None).unwrap();
        assert_close(plan.bar_width, 1.0 / 3.0);

        let a: Vec<_> = plan.bars_of("A").map(|bar| bar.position).collect();
        let b: Vec<_> = plan.bars_of("B").map(|bar| bar.position).collect();
        assert_close(a[0], 0.0);
        assert_close(a[1], 1.0);
        assert_close(b[0], 1.0 / 3.0);
        assert_close(b[1], 4.0 / 3.0);

        assert_close(plan.ticks[0], 1.0 / 3.0);
        assert_close(plan.ticks[1], 4.0 / 3.0);
        assert_eq!(plan.tick_labels, vec!["res1", "res2"]);
    }

    #[test]
    fn draw_order_is_configuration_then_resource() {
        let plan = layout(&["A", "B"], &["r0", "r1", "r2"], None).unwrap();
        let order: Vec<_> = plan
            .bars
            .iter()
            .map(|bar| (bar.configuration.as_str(), bar.resource_index))
            .collect();
        assert_eq!(
            order,
            vec![("A", 0), ("A", 1), ("A", 2), ("B", 0), ("B", 1), ("B", 2)]
        );
    }

    #[test]
    fn one_color_per_configuration() {
        let plan = layout(&["A", "B", "C"], &["r0", "r1"], None).unwrap();
        for (index, configuration) in ["A", "B", "C"].iter().enumerate() {
            let expected = color::configuration_color(index, 3);
            assert!(plan
                .bars_of(configuration)
                .all(|bar| bar.color == expected));
        }
    }

    #[test]
    fn scenario_groups_alternate_opacity() {
        let resources: Vec<_> = names("r", 7);
        let plan = compute_layout(
            &["A", "B"],
            &resources,
            Some(3),
            SHADING,
            0,
            |_, _| Ok(0.0),
        )
        .unwrap();
        let opacities: Vec<_> =
            plan.bars_of("B").map(|bar| bar.opacity).collect();
        let light = SHADING.opacity - SHADING.lighten;
        let expected = [0.7, light, 0.7, light, 0.7, light, 0.7];
        assert_eq!(opacities.len(), expected.len());
        for (opacity, expected) in opacities.iter().zip(&expected) {
            assert_close(*opacity, *expected);
        }
    }

    #[test]
    fn adjacent_bars_differ_across_group_boundaries() {
        let resources = ["r0", "r1", "r2", "r3", "r4", "r5"];
        let plan = layout(&["A"], &resources, Some(3)).unwrap();
        let opacities: Vec<_> =
            plan.bars.iter().map(|bar| bar.opacity).collect();
        let light = SHADING.opacity - SHADING.lighten;
        let expected = [0.7, light, 0.7, light, 0.7, light];
        assert_eq!(opacities.len(), expected.len());
        for (opacity, expected) in opacities.iter().zip(&expected) {
            assert_close(*opacity, *expected);
        }
    }

    #[test]
    fn without_groups_opacity_is_constant() {
        let plan = layout(&["A"], &["r0", "r1", "r2", "r3"], None).unwrap();
        assert!(plan.bars.iter().all(|bar| bar.opacity == SHADING.opacity));
    }

    #[test]
    fn tick_labels_strip_prefix() {
        let plan = compute_layout(
            &["greedy"],
            &["req_rapide_1_240_24", "short"],
            None,
            SHADING,
            11,
            |_, _| Ok(0.0),
        )
        .unwrap();
        assert_eq!(plan.tick_labels, vec!["1_240_24", ""]);
    }

    #[test]
    fn values_come_from_lookup() {
        let plan = compute_layout(
            &["A", "B"],
            &["r0", "r1"],
            None,
            SHADING,
            0,
            |configuration, resource| {
                let base = if configuration == "A" { 10.0 } else { 20.0 };
                let offset = if resource == "r0" { 0.0 } else { 1.0 };
                Ok(base + offset)
            },
        )
        .unwrap();
        let values: Vec<_> = plan.bars.iter().map(|bar| bar.value).collect();
        assert_eq!(values, vec![10.0, 11.0, 20.0, 21.0]);
    }

    #[test]
    fn lookup_errors_propagate() {
        let result = compute_layout(
            &["A"],
            &["r0"],
            None,
            SHADING,
            0,
            |_, _| Err(PlotError::EmptyInput("values")),
        );
        assert!(matches!(result, Err(PlotError::EmptyInput("values"))));
    }

    #[test]
    fn empty_inputs() {
        let none: [&str; 0] = [];
        assert!(matches!(
            layout(&none, &["r0"], None),
            Err(PlotError::EmptyInput("configurations"))
        ));
        assert!(matches!(
            layout(&["A"], &none, None),
            Err(PlotError::EmptyInput("resources"))
        ));
        assert!(layout(&["A"], &["r0"], Some(0)).is_err());
    }

    #[quickcheck]
    fn one_bar_per_pair(configurations: u8, resources: u8) -> TestResult {
        if configurations == 0 || resources == 0 {
            return TestResult::discard();
        }
        let configurations = names("c", configurations as usize % 16 + 1);
        let resources = names("r", resources as usize % 32 + 1);
        let plan = compute_layout(
            &configurations,
            &resources,
            None,
            SHADING,
            0,
            |_, _| Ok(1.0),
        )
        .unwrap();

        let mut pairs: Vec<_> = plan
            .bars
            .iter()
            .map(|bar| (bar.configuration.clone(), bar.resource_index))
            .collect();
        let count = pairs.len();
        pairs.sort();
        pairs.dedup();
        TestResult::from_bool(
            count == configurations.len() * resources.len()
                && pairs.len() == count
                && plan.ticks.len() == resources.len(),
        )
    }

    #[quickcheck]
    fn bar_width_leaves_one_slot(configurations: u8) -> bool {
        let configurations = names("c", configurations as usize + 1);
        let plan = compute_layout(
            &configurations,
            &["r0"],
            None,
            SHADING,
            0,
            |_, _| Ok(1.0),
        )
        .unwrap();
        (plan.bar_width * (configurations.len() + 1) as f64 - 1.0).abs()
            < 1e-9
    }

    #[quickcheck]
    fn one_legend_entry_per_configuration(
        configurations: u8,
        resources: u8,
        group: u8,
    ) -> bool {
        let configurations = names("c", configurations as usize % 8 + 1);
        let resources = names("r", resources as usize % 16 + 1);
        let group = Some(group as usize % 4 + 1);
        let plan = compute_layout(
            &configurations,
            &resources,
            group,
            SHADING,
            0,
            |_, _| Ok(1.0),
        )
        .unwrap();

        let labels: Vec<_> = plan.labels().collect();
        labels == configurations.iter().map(String::as_str).collect::<Vec<_>>()
            && plan
                .bars
                .iter()
                .filter(|bar| bar.label.is_some())
                .all(|bar| bar.resource_index == 0)
    }
}
