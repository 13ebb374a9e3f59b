use crate::error::ExpError;
use crate::experiment::RawExperiment;

/// Combines two result files covering the same resources. For each resource,
/// configurations in `overlay` are added to those in `base`, replacing any
/// with the same name.
///
/// Both inputs must cover exactly the same resources: a resource present in
/// only one of them is reported as `MissingKey` instead of being dropped.
pub fn merge(
    base: RawExperiment,
    overlay: RawExperiment,
) -> Result<RawExperiment, ExpError> {
    let unknown = overlay.resources().find(|r| base.get(r.as_str()).is_none());
    if let Some(resource) = unknown {
        return Err(ExpError::MissingKey {
            resource: resource.clone(),
            missing_from: "base",
        });
    }

    let mut overlay = overlay.into_inner();
    let mut merged = base.into_inner();
    for (resource, configurations) in merged.iter_mut() {
        let extra = overlay.remove(resource).ok_or_else(|| {
            ExpError::MissingKey {
                resource: resource.clone(),
                missing_from: "overlay",
            }
        })?;
        tracing::debug!(
            "{}: {} configurations + {} from overlay",
            resource,
            configurations.len(),
            extra.len()
        );
        configurations.extend(extra);
    }
    Ok(RawExperiment::from_inner(merged))
}
