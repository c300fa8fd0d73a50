//! # Waypost Engine
//!
//! The field-projection and resilient-pagination engine behind the Waypost
//! read API.
//!
//! A hotel record is assembled from two heterogeneous sources: a small set
//! of always-present attributes held in an order-stable registry index, and
//! a larger set of attributes fetched lazily from pointer-addressed remote
//! documents. Given a client-supplied list of dotted field paths, the
//! engine works out which fetches are needed, resolves each record from
//! both sources while tolerating per-record failures, reshapes the result
//! into exactly the requested shape, validates it against a schema view
//! scoped to the requested fields, and produces a stable page of records
//! plus a cursor.
//!
//! ## Design Principles
//!
//! - **No transport**: the registry and document fetches live behind the
//!   [`HotelRecord`] contract; the engine never touches the network itself
//! - **Failures are data**: a record that cannot be resolved becomes a
//!   [`ResolutionFailure`] in the page, never a raised error
//! - **Pages stay full**: the assembler backfills from further windows so
//!   per-record failures do not shrink a page while records remain
//!
//! ## Core Concepts
//!
//! ### Field plans
//!
//! [`plan`] (or [`plan_query`] for a comma-joined string) classifies each
//! requested field as index-resident or document-resident, producing a
//! [`PathSpec`]. Unknown fields are silently dropped.
//!
//! ### Record trees
//!
//! A materialized record is a [`Tree`] whose remote subtrees are tagged
//! [`Pointer`]s: `Unresolved` carries only the document address, `Resolved`
//! carries the fetched contents. [`flatten`] projects a tree onto the
//! requested paths, unwrapping pointers as it descends.
//!
//! ### Page assembly
//!
//! [`paginate`] cuts a cursor window out of the registry enumeration;
//! [`fill_page`] resolves and validates each window element and keeps
//! pulling further windows while failures leave the page short.
//!
//! ## Quick Start
//!
//! ```rust
//! use waypost_engine::{flatten, plan_query, Pointer, Tree};
//! use serde_json::json;
//!
//! // 1. Plan the client's field list
//! let spec = plan_query("managerAddress,name,roomTypes.name");
//! assert_eq!(spec.on_index, vec!["manager"]);
//! assert_eq!(
//!     spec.to_flatten,
//!     vec!["descriptionUri.name", "descriptionUri.roomTypes.name"],
//! );
//!
//! // 2. Flatten a materialized record tree onto those paths
//! let contents = Tree::object([(
//!     "descriptionUri",
//!     Tree::pointer(Pointer::resolved(
//!         "json://description",
//!         Tree::from(json!({
//!             "name": "Grand Hotel",
//!             "roomTypes": {"rt-1": {"name": "single", "price": 60}},
//!         })),
//!     )),
//! )]);
//! let projected = flatten(&contents, &spec.to_flatten);
//! assert_eq!(
//!     projected,
//!     json!({"descriptionUri": {
//!         "name": "Grand Hotel",
//!         "roomTypes": {"rt-1": {"name": "single"}},
//!     }}),
//! );
//! ```

pub mod assemble;
pub mod error;
pub mod fields;
pub mod flatten;
pub mod paginate;
pub mod resolve;
pub mod schema;
pub mod tree;

// Re-export main types at crate root
pub use assemble::{fill_page, Page};
pub use error::{Error, Result, SourceError};
pub use fields::{plan, plan_query, PathSpec};
pub use flatten::flatten;
pub use paginate::{paginate, Window};
pub use resolve::{
    resolve_record, HotelRecord, PlainRecord, ResolutionFailure, ResolvedRecord,
    DOCUMENT_ERROR, GENERIC_ERROR, INDEX_ERROR,
};
pub use schema::{FieldDef, FieldType, SchemaView, ValidationFailure, Violation};
pub use tree::{DocumentRef, Pointer, Tree};

/// Type aliases for clarity
pub type FieldPath = String;
pub type RecordAddress = String;
pub type Cursor = String;
