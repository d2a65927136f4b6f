//! Declarative JSON-to-JSON restructuring.
//!
//! A [`MappingTable`] pairs source paths with destination specs. Running it
//! against a source document selects each source path and writes the result
//! into a destination document, creating intermediate objects and arrays on
//! demand.
//!
//! `transform` and `default` callbacks may be async, so the entry points are
//! too. Any executor will do; the example below uses `futures`.
//!
//! # Example
//!
//! ```
//! use object_mapper::{map, DestSpec, MappingTable, Value};
//! use serde_json::json;
//!
//! let src = Value::from(json!({
//!     "sku": "12345",
//!     "upc": "99999912345X",
//!     "title": "Test Item",
//!     "inventory": {"onHandQty": 12}
//! }));
//!
//! let table = MappingTable::new()
//!     .entry("sku", "Envelope.Request.Item.SKU")
//!     .entry("title", DestSpec::many(["Envelope.Request.Item.ShortTitle", "Envelope.Request.Item.LongTitle"]))
//!     .entry("inventory.onHandQty", "Envelope.Request.Item.Quantity")
//!     .entry("description", DestSpec::path("Envelope.Request.Item.Description").with_default("n/a"));
//!
//! let out = futures::executor::block_on(map(&src, &table)).unwrap().unwrap();
//! assert_eq!(
//!     out.to_json(),
//!     json!({"Envelope": {"Request": {"Item": {
//!         "SKU": "12345",
//!         "ShortTitle": "Test Item",
//!         "LongTitle": "Test Item",
//!         "Quantity": 12,
//!         "Description": "n/a"
//!     }}}})
//! );
//! ```

pub mod cli;
pub mod context;
pub mod error;
pub mod mapper;
pub mod normalize;
pub mod parser;
pub mod select;
pub mod spec;
pub mod types;
pub mod update;
pub mod value;

pub use context::{CallbackScope, MappingContext};
pub use error::{CallbackError, MapError, SpecError};
pub use mapper::{map, merge, MapperOptions, MappingTable, ObjectMapper};
pub use normalize::{set_key_value, set_value};
pub use parser::{parse_path, parse_path_with, split_path, DEFAULT_DELIMITER};
pub use select::{get_value, select};
pub use spec::{CallbackResult, DefaultValue, DestSpec, Transform};
pub use types::{Path, PathSegment, WILDCARD_NAME};
pub use update::{update, MAX_ARRAY_INDEX};
pub use value::{Map, Value};
