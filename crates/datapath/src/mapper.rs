//! Source-to-target mapping.

use std::sync::Arc;

use datapath_core::{
    DotPath, PathCache, PathSegment, Record, Resolved, ResultMap, TreeNodeMut, Value, WriteValue,
    mutate, resolve,
};
use tracing::debug;

use crate::accessor::DataAccessor;
use crate::config::{Mapping, MapperConfig, MapperOptions};
use crate::error::MapperResult;

/// Copies values from a source tree into a target tree.
///
/// Mappings are applied in declaration order. A wildcard source whose
/// target has the same number of wildcards is copied branch by branch: the
/// concrete keys the source wildcards matched are substituted into the
/// target wildcards, so target branches are created as needed. Any other
/// wildcard mapping is paired with the target's existing branches by
/// position.
///
/// ```rust
/// use datapath::DataMapper;
/// use datapath_core::Value;
/// use serde_json::json;
///
/// let source = Value::from(json!({"users": [{"email": "a@x"}, {"email": "b@x"}]}));
/// let target = DataMapper::new()
///     .map("contacts.*.email", "users.*.email")
///     .map_into(&source)?;
///
/// assert_eq!(target, Value::from(json!({"contacts": [{"email": "a@x"}, {"email": "b@x"}]})));
/// # Ok::<(), datapath::MapperError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DataMapper {
    mappings: Vec<Mapping>,
    options: MapperOptions,
    cache: Arc<PathCache>,
}

impl Default for DataMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl DataMapper {
    /// Create a mapper with no mappings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
            options: MapperOptions::default(),
            cache: PathCache::global(),
        }
    }

    /// Create a mapper from a loaded configuration.
    #[must_use]
    pub fn from_config(config: MapperConfig) -> Self {
        Self {
            mappings: config.mappings,
            options: config.options,
            cache: PathCache::global(),
        }
    }

    /// Add a `target <- source` mapping.
    #[must_use]
    pub fn map(mut self, target: impl Into<String>, source: impl Into<String>) -> Self {
        self.mappings.push(Mapping::new(target, source));
        self
    }

    /// Do not write null source values.
    #[must_use]
    pub fn skip_null(mut self, skip: bool) -> Self {
        self.options.skip_null = skip;
        self
    }

    /// Use a specific path cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<PathCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The configured mappings.
    #[must_use]
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Apply every mapping from `source` into `target`, returning the number
    /// of values written.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidMapping`](crate::MapperError::InvalidMapping)
    /// for a wildcard source paired with a direct target, or a path engine
    /// error from the write.
    pub fn apply<N: TreeNodeMut>(&self, source: &N, target: &mut N) -> MapperResult<usize> {
        let mut written = 0_usize;
        for mapping in &self.mappings {
            mapping.validate()?;
            let count = self.apply_one(mapping, source, target)?;
            debug!(source = %mapping.source, target = %mapping.target, count, "applied mapping");
            written = written.saturating_add(count);
        }
        Ok(written)
    }

    /// Apply every mapping into a fresh tree.
    ///
    /// # Errors
    ///
    /// See [`DataMapper::apply`].
    pub fn map_into<N: TreeNodeMut>(&self, source: &N) -> MapperResult<N> {
        let mut target = N::null();
        self.apply(source, &mut target)?;
        Ok(target)
    }

    fn apply_one<N: TreeNodeMut>(
        &self,
        mapping: &Mapping,
        source: &N,
        target: &mut N,
    ) -> MapperResult<usize> {
        let source_path = self.cache.parse(&mapping.source);
        let target_path = self.cache.parse(&mapping.target);
        let target_segments: &[PathSegment] = if mapping.target.is_empty() {
            &[]
        } else {
            target_path.segments()
        };

        let read = DataAccessor::new(source)
            .with_cache(Arc::clone(&self.cache))
            .get(&mapping.source);

        match read {
            Resolved::Value(value) => {
                if self.options.skip_null && value.is_null() {
                    return Ok(0);
                }
                Ok(mutate(target, target_segments, WriteValue::Single(value))?)
            },
            Resolved::Map(entries)
                if source_path.wildcard_count() == target_path.wildcard_count() =>
            {
                self.write_substituted(&source_path, &target_path, entries, target)
            },
            Resolved::Map(entries) => {
                let entries = if self.options.skip_null {
                    keep_existing_for_nulls(entries, target, target_segments)
                } else {
                    entries
                };
                Ok(mutate(target, target_segments, WriteValue::Map(entries))?)
            },
        }
    }

    /// Write each entry at the target path with its wildcards replaced by
    /// the concrete keys the source wildcards matched.
    fn write_substituted<N: TreeNodeMut>(
        &self,
        source_path: &DotPath,
        target_path: &DotPath,
        entries: ResultMap<N>,
        target: &mut N,
    ) -> MapperResult<usize> {
        let positions = source_path.wildcard_positions();
        let mut written = 0_usize;

        for (concrete, value) in entries {
            if self.options.skip_null && value.is_null() {
                continue;
            }
            let keys: Vec<&str> = concrete.split('.').collect();
            // Branches cut short by a missing key have no key for later wildcards.
            let Some(matched) = positions
                .iter()
                .map(|&pos| keys.get(pos).copied())
                .collect::<Option<Vec<&str>>>()
            else {
                continue;
            };

            let mut matched = matched.into_iter();
            let segments: Vec<PathSegment> = target_path
                .segments()
                .iter()
                .map(|segment| match segment {
                    PathSegment::Wildcard => {
                        matched.next().map_or(PathSegment::Wildcard, concrete_segment)
                    },
                    other => other.clone(),
                })
                .collect();

            written = written.saturating_add(mutate(target, &segments, WriteValue::Single(value))?);
        }
        Ok(written)
    }

    /// Fill a template from `source`.
    ///
    /// Every string leaf of the form `{{ path }}` is replaced with the value
    /// read at `path`; wildcard reads become lists of their values. Other
    /// leaves are copied. With `skip_null`, keys whose placeholder resolves
    /// to null are dropped.
    #[must_use]
    pub fn map_template(&self, source: &Value, template: &Value) -> Value {
        let accessor = DataAccessor::new(source).with_cache(Arc::clone(&self.cache));
        self.fill(&accessor, template).unwrap_or(Value::Null)
    }

    fn fill(&self, accessor: &DataAccessor<'_, Value>, template: &Value) -> Option<Value> {
        match template {
            Value::String(text) => match placeholder(text) {
                Some(path) => {
                    let value = match accessor.get(path) {
                        Resolved::Value(value) => value,
                        Resolved::Map(map) => Value::List(map.into_values().collect()),
                    };
                    (!(self.options.skip_null && value.is_null())).then_some(value)
                },
                None => Some(template.clone()),
            },
            Value::List(items) => Some(Value::List(
                items.iter().filter_map(|item| self.fill(accessor, item)).collect(),
            )),
            Value::Map(map) => Some(Value::Map(
                map.iter()
                    .filter_map(|(key, item)| Some((key.clone(), self.fill(accessor, item)?)))
                    .collect(),
            )),
            Value::Record(record) => Some(Value::Record(Record {
                type_name: record.type_name.clone(),
                fields: record
                    .fields
                    .iter()
                    .filter_map(|(key, item)| Some((key.clone(), self.fill(accessor, item)?)))
                    .collect(),
            })),
            other => Some(other.clone()),
        }
    }
}

/// The path inside a `{{ path }}` placeholder.
fn placeholder(text: &str) -> Option<&str> {
    text.trim()
        .strip_prefix("{{")?
        .strip_suffix("}}")
        .map(str::trim)
}

/// A concrete key as a segment; a key spelled `*` stays literal.
fn concrete_segment(key: &str) -> PathSegment {
    match PathSegment::from_token(key) {
        PathSegment::Wildcard => PathSegment::Key(key.to_owned()),
        segment => segment,
    }
}

/// Replace null entries with the target's current value at the same
/// branch, so positional pairing writes them back unchanged.
fn keep_existing_for_nulls<N: TreeNodeMut>(
    entries: ResultMap<N>,
    target: &N,
    target_segments: &[PathSegment],
) -> ResultMap<N> {
    let existing: Vec<N> = match resolve(target, target_segments) {
        Resolved::Map(map) => map.into_values().collect(),
        Resolved::Value(_) => Vec::new(),
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (concrete, value))| {
            if value.is_null() {
                let current = existing.get(i).cloned().unwrap_or(value);
                (concrete, current)
            } else {
                (concrete, value)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use datapath_test::{departments, order, user_profile, users_with_emails};
    use serde_json::json;

    use super::*;
    use crate::error::MapperError;

    #[test]
    fn test_direct_mappings() {
        let source = Value::from(user_profile());
        let target = DataMapper::new()
            .map("contact.name", "user.profile.name")
            .map("contact.email", "user.profile.email")
            .map("contact.phone", "user.profile.phone")
            .map_into(&source)
            .unwrap();
        assert_eq!(
            target,
            Value::from(json!({
                "contact": {"name": "John Doe", "email": "john@example.com", "phone": null}
            }))
        );
    }

    #[test]
    fn test_skip_null_direct() {
        let source = Value::from(user_profile());
        let target = DataMapper::new()
            .skip_null(true)
            .map("contact.phone", "user.profile.phone")
            .map("contact.name", "user.profile.name")
            .map_into(&source)
            .unwrap();
        assert_eq!(target, Value::from(json!({"contact": {"name": "John Doe"}})));
    }

    #[test]
    fn test_wildcard_substitution_builds_target() {
        let source = Value::from(users_with_emails());
        let target = DataMapper::new()
            .map("contacts.*.address", "users.*.email")
            .map_into(&source)
            .unwrap();
        assert_eq!(
            target,
            Value::from(json!({
                "contacts": [{"address": "a@x"}, {"address": "b@x"}, {"address": "c@x"}]
            }))
        );
    }

    #[test]
    fn test_multi_wildcard_substitution() {
        let source = Value::from(departments());
        let target = DataMapper::new()
            .map("teams.*.members.*", "departments.*.users.*.name")
            .map_into(&source)
            .unwrap();
        assert_eq!(
            target,
            Value::from(json!({"teams": [{"members": ["Ann", "Ben"]}, {"members": ["Cat", "Dan"]}]}))
        );
    }

    #[test]
    fn test_substitution_skips_nulls() {
        let source = Value::from(order());
        let target = DataMapper::new()
            .skip_null(true)
            .map("notes.*", "order.items.*.note")
            .map_into(&source)
            .unwrap();
        // Only item 1 has a note key, and it is null.
        assert_eq!(target, Value::Null);
    }

    #[test]
    fn test_positional_fallback_when_wildcard_counts_differ() {
        let source = Value::from(departments());
        let mut target = Value::from(json!({"titles": [{}, {}, {}, {}]}));
        let written = DataMapper::new()
            .map("titles.*.text", "departments.*.users.*.posts.0.title")
            .apply(&source, &mut target)
            .unwrap();
        assert_eq!(written, 4);
        assert_eq!(
            DataAccessor::new(&target).get_string("titles.3.text").as_deref(),
            Some("Pipeline hygiene")
        );
    }

    #[test]
    fn test_positional_skip_null_keeps_existing() {
        let source = Value::from(json!({"groups": [{"rows": [{"e": "new"}, {"e": null}]}]}));
        let mut target = Value::from(json!({"rows": [{"mail": "old0"}, {"mail": "old1"}]}));
        let written = DataMapper::new()
            .skip_null(true)
            .map("rows.*.mail", "groups.*.rows.*.e")
            .apply(&source, &mut target)
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            target,
            Value::from(json!({"rows": [{"mail": "new"}, {"mail": "old1"}]}))
        );
    }

    #[test]
    fn test_wildcard_source_to_direct_target_is_invalid() {
        let source = Value::from(users_with_emails());
        let err = DataMapper::new()
            .map("contact.email", "users.*.email")
            .map_into(&source)
            .unwrap_err();
        assert!(matches!(err, MapperError::InvalidMapping { .. }));
    }

    #[test]
    fn test_empty_source_copies_whole_tree() {
        let source = Value::from(user_profile());
        let target = DataMapper::new().map("copy", "").map_into(&source).unwrap();
        assert_eq!(
            DataAccessor::new(&target).get_string("copy.user.profile.name").as_deref(),
            Some("John Doe")
        );
    }

    #[test]
    fn test_from_config() {
        let config = MapperConfig::from_toml_str(
            r#"
            [options]
            skip_null = true

            [[mapping]]
            source = "user.profile.email"
            target = "email"

            [[mapping]]
            source = "user.profile.phone"
            target = "phone"
        "#,
        )
        .unwrap();
        let target = DataMapper::from_config(config)
            .map_into(&Value::from(user_profile()))
            .unwrap();
        assert_eq!(target, Value::from(json!({"email": "john@example.com"})));
    }

    #[test]
    fn test_map_template() {
        let source = Value::from(order());
        let template = Value::from(json!({
            "id": "{{ order.id }}",
            "buyer": {"name": "{{order.customer.name}}", "source": "web"},
            "skus": "{{ order.items.*.sku }}",
            "coupon": "{{ order.coupon }}"
        }));
        let filled = DataMapper::new().map_template(&source, &template);
        assert_eq!(
            filled,
            Value::from(json!({
                "id": 1001,
                "buyer": {"name": "Eve", "source": "web"},
                "skus": ["A-1", "B-2", "C-3"],
                "coupon": null
            }))
        );

        let filled = DataMapper::new().skip_null(true).map_template(&source, &template);
        assert!(filled.as_map().unwrap().get("coupon").is_none());
    }

    #[test]
    fn test_placeholder_parsing() {
        assert_eq!(placeholder("{{ a.b }}"), Some("a.b"));
        assert_eq!(placeholder("  {{a}} "), Some("a"));
        assert_eq!(placeholder("plain"), None);
        assert_eq!(placeholder("{{ open"), None);
    }

    #[test]
    fn test_mapper_over_json() {
        let source = users_with_emails();
        let target = DataMapper::new()
            .map("names.*", "users.*.name")
            .map_into(&source)
            .unwrap();
        assert_eq!(target, json!({"names": ["Alice", "Bob", "Carol"]}));
    }
}
