//! Request handlers for the hotel read endpoints.

mod detail;
mod list;

pub use detail::*;
pub use list::*;

/// Page size used when the client does not send a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 30;

/// Fields served by the list endpoint when none are requested.
pub const DEFAULT_LIST_FIELDS: &str = "id,location,name";

/// Fields served by the detail endpoint when none are requested.
pub const DEFAULT_DETAIL_FIELDS: &str =
    "id,location,name,description,contacts,address,currency,images,amenities,updatedAt";
