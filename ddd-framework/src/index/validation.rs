use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};
use crate::index::IndexSpec;
use itertools::Itertools;

/// Validates a declared set of desired indexes.
///
/// Rejected with [`ErrorKind::ConfigurationError`]:
/// - a spec without keys, or with an empty field path
/// - a spec naming the same field twice
/// - a spec with the shape of the store's primary-key index
/// - two specs over the same key sequence with different `unique` flags
///
/// Structurally identical specs are accepted; they collapse into a single
/// physical index during reconciliation.
pub fn validate_indexes(desired: &[IndexSpec]) -> FrameworkResult<()> {
    for spec in desired {
        validate_index(spec)?;
    }

    let groups = desired
        .iter()
        .map(|spec| (spec.keys(), spec))
        .into_group_map();
    for specs in groups.values() {
        if !specs.iter().map(|spec| spec.is_unique()).all_equal() {
            log::error!("Conflicting uniqueness declared for index {}", specs[0]);
            return Err(FrameworkError::new(
                &format!(
                    "Index over {} is declared both unique and non-unique. Keep a single declaration per key sequence",
                    IndexSpec::new(specs[0].keys().to_vec())
                ),
                ErrorKind::ConfigurationError,
            ));
        }
    }
    Ok(())
}

fn validate_index(spec: &IndexSpec) -> FrameworkResult<()> {
    if spec.keys().is_empty() {
        log::error!("Index declared without keys");
        return Err(FrameworkError::new(
            "Index must declare at least one key",
            ErrorKind::ConfigurationError,
        ));
    }

    if spec.field_names().iter().any(|field| field.trim().is_empty()) {
        log::error!("Index {} declares an empty field path", spec);
        return Err(FrameworkError::new(
            &format!("Index {} declares an empty field path", spec),
            ErrorKind::ConfigurationError,
        ));
    }

    if let Some(field) = spec.field_names().into_iter().duplicates().next() {
        log::error!("Index {} declares field '{}' more than once", spec, field);
        return Err(FrameworkError::new(
            &format!("Index {} declares field '{}' more than once", spec, field),
            ErrorKind::ConfigurationError,
        ));
    }

    if spec.is_reserved() {
        log::error!("Index {} duplicates the primary-key index", spec);
        return Err(FrameworkError::new(
            &format!("Index {} is the store's primary-key index and cannot be declared", spec),
            ErrorKind::ConfigurationError,
        ));
    }
    Ok(())
}
