//! Pluggable phrase mappings owned by the language layer.
//!
//! Which phrases mean which record type, and which activity types a topic
//! like "transmitter issues" covers, is deployment data. Nothing here is
//! built in; an empty config matches no phrase.
//!
//! ```
//! use actlog_core::config::CategoryConfig;
//! use actlog_core::RecordType;
//!
//! let config: CategoryConfig = toml::from_str(
//!     r#"
//! [record_type_aliases]
//! glucose = "GlucoseRecord"
//!
//! [[filters]]
//! name = "battery"
//! phrases = ["battery"]
//! rules = [{ activity_type = "Battery" }]
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     config.resolve_record_type("show glucose for May 1").unwrap(),
//!     Some(RecordType::GlucoseRecord)
//! );
//! assert_eq!(config.filter_for_phrase("battery drain?").unwrap().name, "battery");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::QueryError;
use crate::models::{ActivityRecord, RecordType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Phrase (matched case-insensitively as a substring) → record type name.
    pub record_type_aliases: BTreeMap<String, String>,
    pub filters: Vec<CategoryFilter>,
}

/// A named subset of activity records.
///
/// A record matches when any rule matches; a rule matches when all of its
/// set fields match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFilter {
    pub name: String,
    pub phrases: Vec<String>,
    pub rules: Vec<CategoryRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRule {
    /// Exact activity type.
    pub activity_type: Option<String>,
    /// Prefix of the activity sub-type.
    pub sub_type_prefix: Option<String>,
}

impl CategoryRule {
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        let type_ok = self
            .activity_type
            .as_deref()
            .map_or(true, |t| record.activity_type == t);
        let sub_ok = self
            .sub_type_prefix
            .as_deref()
            .map_or(true, |p| record.activity_sub_type.starts_with(p));
        type_ok && sub_ok
    }
}

impl CategoryFilter {
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.rules.iter().any(|rule| rule.matches(record))
    }

    fn mentioned_in(&self, text: &str) -> bool {
        self.phrases
            .iter()
            .any(|p| !p.is_empty() && text.contains(&p.to_lowercase()))
    }
}

impl CategoryConfig {
    /// Look up a filter by name.
    pub fn filter(&self, name: &str) -> Result<&CategoryFilter, QueryError> {
        self.filters
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| QueryError::UnknownFilter {
                name: name.to_string(),
            })
    }

    /// First filter whose phrases occur in `text`.
    pub fn filter_for_phrase(&self, text: &str) -> Option<&CategoryFilter> {
        let text = text.to_lowercase();
        self.filters.iter().find(|f| f.mentioned_in(&text))
    }

    /// Record type named by the first alias occurring in `text`.
    ///
    /// Longer aliases win over shorter ones they contain.
    pub fn resolve_record_type(&self, text: &str) -> Result<Option<RecordType>, QueryError> {
        let text = text.to_lowercase();
        let best = self
            .record_type_aliases
            .iter()
            .filter(|(phrase, _)| !phrase.is_empty() && text.contains(&phrase.to_lowercase()))
            .max_by_key(|(phrase, _)| phrase.len());
        match best {
            Some((_, name)) => name.parse().map(Some),
            None => Ok(None),
        }
    }
}
