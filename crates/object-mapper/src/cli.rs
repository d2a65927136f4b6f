//! Logic behind the `json-map` binary.

use futures::executor::block_on;
use thiserror::Error;

use crate::error::{MapError, SpecError};
use crate::mapper::{MappingTable, ObjectMapper};
use crate::value::Value;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Spec(#[from] SpecError),

    #[error("{0}")]
    Map(#[from] MapError),
}

/// Maps the JSON document `source` through the JSON mapping table `mapping`.
///
/// `seed` is an optional destination document to merge into. Returns the
/// result pretty-printed; `null` when nothing was written.
///
/// Tables read from JSON carry no callbacks, so the mapping is driven to
/// completion on the current thread.
pub fn run_mapping(source: &str, mapping: &str, seed: Option<&str>) -> Result<String, CliError> {
    let src: Value = serde_json::from_str(source)?;
    let table = MappingTable::from_json(&serde_json::from_str(mapping)?)?;
    let dest = seed.map(|s| serde_json::from_str::<Value>(s)).transpose()?;

    let out = block_on(ObjectMapper::new(table).merge(&src, dest))?;
    let json = out.map_or(serde_json::Value::Null, |v| v.to_json());
    Ok(serde_json::to_string_pretty(&json)?)
}
