//! Category filters resolved from configuration.

use std::borrow::Cow;

use actlog_core::config::CategoryConfig;
use actlog_core::errors::QueryError;
use actlog_core::ActivityRecord;

/// Restrict `records` to the named category filter, if any.
///
/// Without a filter the records are borrowed as they are.
pub fn apply_filter<'a>(
    records: &'a [ActivityRecord],
    filter: Option<&str>,
    categories: &CategoryConfig,
) -> Result<Cow<'a, [ActivityRecord]>, QueryError> {
    let Some(name) = filter else {
        return Ok(Cow::Borrowed(records));
    };
    let filter = categories.filter(name)?;
    Ok(Cow::Owned(
        records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect(),
    ))
}
