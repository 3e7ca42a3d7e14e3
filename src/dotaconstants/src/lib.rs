//! # dotaconstants
//!
//! Dota 2 constants library - turns game scripts, localization files and web
//! feeds into the lookup tables of the constants bundle.
//!
//! This library provides:
//! - Formatting of per-level numeric values (`"20 20 20"` → `"20"`)
//! - `%placeholder%` substitution in localized descriptions
//! - Display lists of ability and item attributes
//! - Item recipe resolution and component tree expansion
//! - A registry of per-source transforms, one per output file
//!
//! The library does no I/O. Callers fetch the documents a [`Source`] lists
//! and hand them to [`Source::run`].
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = dotaconstants::find_source("region").expect("registered");
//! let regions = json!({
//!     "regions": { "USWest": { "region": "1", "display_name": "#dota_region_us_west" } }
//! });
//!
//! let record = source.run(vec![regions])?;
//! assert_eq!(serde_json::to_value(&record)?, json!({ "1": "US WEST" }));
//! # Ok(())
//! # }
//! ```

pub mod attributes;
pub mod compat;
pub mod documents;
pub mod error;
pub mod graph;
pub mod keyset;
pub mod sources;
pub mod strings;
pub mod template;
pub mod values;

#[doc(inline)]
pub use error::{GraphError, TransformError};
#[doc(inline)]
pub use keyset::KeySet;
#[doc(inline)]
pub use sources::{find as find_source, Location, Record, Source, LOCATIONS, SOURCES};
#[doc(inline)]
pub use strings::StringTable;
#[doc(inline)]
pub use values::{format_values, Formatted};

// Building blocks used by the item and ability transforms
#[doc(inline)]
pub use attributes::{format_attributes, Attribute};
#[doc(inline)]
pub use graph::{ItemGraph, Recipe};
#[doc(inline)]
pub use template::{render_description, substitute, Substitution};
