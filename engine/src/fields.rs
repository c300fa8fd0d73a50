//! Field planning: turning a client field list into a query plan.
//!
//! A requested field is either index-resident (readable straight off the
//! registry entry) or lives inside one of the remote document groups. The
//! classification is table-driven so the kept-vs-dropped decision stays
//! auditable; unknown field names are dropped, never errored.

use crate::FieldPath;

/// Attributes resolvable from the registry index without a document fetch.
pub const INDEX_FIELDS: &[&str] = &["manager", "created"];

/// Fields that live inside the description document.
pub const DESCRIPTION_FIELDS: &[&str] = &[
    "name",
    "description",
    "location",
    "contacts",
    "address",
    "roomTypes",
    "timezone",
    "currency",
    "images",
    "amenities",
    "updatedAt",
];

/// Remote-document attributes addressed directly by their group name.
pub const DOCUMENT_FIELDS: &[&str] = &[
    "ratePlansUri",
    "availabilityUri",
    "notificationsUri",
    "bookingUri",
];

/// Synthetic prefix for fields fetched through the description document.
pub const DESCRIPTION_GROUP: &str = "descriptionUri";

/// Map a client-facing field name to its internal name.
fn from_query_name(field: &str) -> &str {
    match field {
        "managerAddress" => "manager",
        other => other,
    }
}

/// Map an internal attribute name back to its public response key.
pub fn to_response_key(field: &str) -> &str {
    match field {
        "manager" => "managerAddress",
        other => other,
    }
}

/// Query plan derived from a client field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSpec {
    /// Canonicalized field list, in request order.
    pub mapped: Vec<FieldPath>,
    /// Fields readable from the registry entry, deduplicated.
    pub on_index: Vec<FieldPath>,
    /// Fields requiring document resolution, rewritten under their group
    /// prefix where needed, deduplicated.
    pub to_flatten: Vec<FieldPath>,
}

/// Plan a comma-joined field query.
pub fn plan_query(fields: &str) -> PathSpec {
    plan(fields.split(','))
}

/// Plan an explicit field list.
///
/// Pure and synchronous; no registry or document access happens here.
pub fn plan<'a>(fields: impl IntoIterator<Item = &'a str>) -> PathSpec {
    let mut spec = PathSpec::default();
    for raw in fields {
        let field = raw.trim();
        if field.is_empty() || field.split('.').any(str::is_empty) {
            continue;
        }
        let mapped = map_path(field);
        spec.mapped.push(mapped.clone());

        let first = mapped.split('.').next().unwrap_or(&mapped);
        if INDEX_FIELDS.contains(&mapped.as_str()) {
            push_unique(&mut spec.on_index, mapped);
        } else if DESCRIPTION_FIELDS.contains(&first) {
            push_unique(&mut spec.to_flatten, format!("{DESCRIPTION_GROUP}.{mapped}"));
        } else if DOCUMENT_FIELDS.contains(&first) {
            push_unique(&mut spec.to_flatten, mapped);
        }
        // Anything else (including "id", which is always injected) is dropped.
    }
    spec
}

/// Apply the alias table to the leading segment of a dotted path.
fn map_path(field: &str) -> FieldPath {
    match field.split_once('.') {
        Some((first, rest)) => format!("{}.{rest}", from_query_name(first)),
        None => from_query_name(field).to_string(),
    }
}

fn push_unique(list: &mut Vec<FieldPath>, field: FieldPath) {
    if !list.contains(&field) {
        list.push(field);
    }
}
