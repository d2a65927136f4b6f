//! Mapping tables and the entry points that run them.

use indexmap::IndexMap;

use crate::context::MappingContext;
use crate::error::{MapError, SpecError};
use crate::normalize::set_key_value;
use crate::parser::{parse_path_with, DEFAULT_DELIMITER};
use crate::select::select;
use crate::spec::DestSpec;
use crate::value::Value;

/// Source path → destination spec, processed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: IndexMap<String, DestSpec>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Re-inserting a source path replaces its spec but keeps
    /// its original position.
    pub fn insert(&mut self, src: impl Into<String>, dest: impl Into<DestSpec>) -> Option<DestSpec> {
        self.entries.insert(src.into(), dest.into())
    }

    /// Builder form of [`MappingTable::insert`].
    pub fn entry(mut self, src: impl Into<String>, dest: impl Into<DestSpec>) -> Self {
        self.insert(src, dest);
        self
    }

    pub fn get(&self, src: &str) -> Option<&DestSpec> {
        self.entries.get(src)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DestSpec)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a table from a JSON object, keeping document order.
    ///
    /// # Errors
    ///
    /// - [`SpecError::TableNotObject`] if `value` is not an object
    /// - any error of [`DestSpec::from_json`] for the entries
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SpecError> {
        let serde_json::Value::Object(map) = value else {
            return Err(SpecError::TableNotObject);
        };
        map.iter()
            .map(|(src, dest)| DestSpec::from_json(dest).map(|spec| (src.clone(), spec)))
            .collect()
    }
}

impl<K, D> FromIterator<(K, D)> for MappingTable
where
    K: Into<String>,
    D: Into<DestSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut table = MappingTable::new();
        for (src, dest) in iter {
            table.insert(src, dest);
        }
        table
    }
}

/// Options for [`ObjectMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Separates path tokens in both source and destination paths.
    pub delimiter: char,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// A reusable mapping table with its options.
#[derive(Debug, Clone, Default)]
pub struct ObjectMapper {
    table: MappingTable,
    options: MapperOptions,
}

impl ObjectMapper {
    pub fn new(table: MappingTable) -> Self {
        Self::with_options(table, MapperOptions::default())
    }

    pub fn with_options(table: MappingTable, options: MapperOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Maps `src` into a fresh destination. `None` if nothing was written.
    pub async fn map(&self, src: &Value) -> Result<Option<Value>, MapError> {
        self.merge(src, None).await
    }

    /// Maps `src` on top of `dest`.
    ///
    /// Entries run one after another in table order; each one, callbacks
    /// included, settles before the next starts. If a callback fails the error
    /// is returned as-is and the partially built destination is dropped.
    pub async fn merge(&self, src: &Value, dest: Option<Value>) -> Result<Option<Value>, MapError> {
        run(src, dest, &self.table, self.options).await
    }
}

async fn run(
    src: &Value,
    mut dest: Option<Value>,
    table: &MappingTable,
    options: MapperOptions,
) -> Result<Option<Value>, MapError> {
    for (src_key, dest_key) in &table.entries {
        let src_key = src_key.as_str();
        let path = parse_path_with(src_key, options.delimiter);
        let value = select(src, &path).unwrap_or(Value::Null);
        tracing::trace!(
            target: "object_mapper::mapper",
            src_key,
            found = !value.is_null(),
            "mapping entry"
        );
        let ctx = MappingContext::new(src, src_key, dest_key).with_delimiter(options.delimiter);
        dest = set_key_value(dest, dest_key, Some(value), &ctx).await?;
    }
    Ok(dest)
}

/// Maps `src` through `table` into a fresh destination.
///
/// # Example
///
/// ```
/// use object_mapper::{map, MappingTable, Value};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let src = Value::from(json!({"foo": {"bar": "baz"}}));
/// let table = MappingTable::new().entry("foo.bar", "bar.foo[].baz");
/// let out = map(&src, &table).await.unwrap();
/// assert_eq!(out, Some(Value::from(json!({"bar": {"foo": [{"baz": "baz"}]}}))));
/// # });
/// ```
pub async fn map(src: &Value, table: &MappingTable) -> Result<Option<Value>, MapError> {
    merge(src, None, table).await
}

/// Maps `src` through `table` on top of an existing destination.
pub async fn merge(
    src: &Value,
    dest: Option<Value>,
    table: &MappingTable,
) -> Result<Option<Value>, MapError> {
    run(src, dest, table, MapperOptions::default()).await
}
