//! Cursor pagination over an order-stable record collection.
//!
//! The paginator never sorts: ordering is whatever enumeration order the
//! registry collaborator provides. A cursor is the identifier of the last
//! record already consumed; the window starts immediately after it.

use crate::error::{Error, Result};

/// One pagination window.
#[derive(Debug, PartialEq, Eq)]
pub struct Window<'a, T> {
    /// Up to `limit` consecutive elements.
    pub items: &'a [T],
    /// Cursor for the following window; absent when the window reaches the
    /// end of the collection.
    pub next_start: Option<String>,
}

/// Cut a window of up to `limit` elements starting after `start_with`.
///
/// `limit` must be positive. `start_with`, when given, must be the key of
/// some element; otherwise the collection cannot be positioned and the call
/// fails with [`Error::MissingStartWith`].
pub fn paginate<'a, T, K>(
    collection: &'a [T],
    limit: i64,
    start_with: Option<&str>,
    key: K,
) -> Result<Window<'a, T>>
where
    K: Fn(&T) -> &str,
{
    if limit <= 0 {
        return Err(Error::InvalidLimit);
    }
    let limit = limit as usize;

    let start = match start_with {
        None => 0,
        Some(cursor) => {
            collection
                .iter()
                .position(|item| key(item) == cursor)
                .ok_or_else(|| Error::MissingStartWith(cursor.to_string()))?
                + 1
        }
    };

    let end = (start + limit).min(collection.len());
    let items = &collection[start..end];
    let next_start = if end < collection.len() {
        items.last().map(|item| key(item).to_string())
    } else {
        None
    };

    Ok(Window { items, next_start })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotels() -> Vec<(String, u32)> {
        (1..=5).map(|i| (format!("0x0{i}"), i)).collect()
    }

    fn addr(item: &(String, u32)) -> &str {
        &item.0
    }

    #[test]
    fn windows_from_the_beginning() {
        let collection = hotels();
        let window = paginate(&collection, 2, None, addr).unwrap();
        assert_eq!(window.items.len(), 2);
        assert_eq!(window.items[0].0, "0x01");
        assert_eq!(window.next_start.as_deref(), Some("0x02"));
    }

    #[test]
    fn cursor_starts_immediately_after_its_record() {
        let collection = hotels();
        let window = paginate(&collection, 2, Some("0x02"), addr).unwrap();
        assert_eq!(window.items[0].0, "0x03");
        assert_eq!(window.items[1].0, "0x04");
        assert_eq!(window.next_start.as_deref(), Some("0x04"));
    }

    #[test]
    fn final_window_has_no_cursor() {
        let collection = hotels();
        let window = paginate(&collection, 10, Some("0x02"), addr).unwrap();
        assert_eq!(window.items.len(), 3);
        assert_eq!(window.next_start, None);
    }

    #[test]
    fn cursor_at_the_last_record_yields_an_empty_window() {
        let collection = hotels();
        let window = paginate(&collection, 3, Some("0x05"), addr).unwrap();
        assert!(window.items.is_empty());
        assert_eq!(window.next_start, None);
    }

    #[test]
    fn unknown_cursor_fails() {
        let collection = hotels();
        let err = paginate(&collection, 3, Some("0xff"), addr).unwrap_err();
        assert_eq!(err, Error::MissingStartWith("0xff".into()));
    }

    #[test]
    fn non_positive_limit_fails_before_any_access() {
        let collection = hotels();
        assert_eq!(paginate(&collection, 0, None, addr), Err(Error::InvalidLimit));
        assert_eq!(
            paginate(&collection, -500, None, addr),
            Err(Error::InvalidLimit)
        );
    }

    #[test]
    fn empty_collection() {
        let collection: Vec<(String, u32)> = Vec::new();
        let window = paginate(&collection, 3, None, addr).unwrap();
        assert!(window.items.is_empty());
        assert_eq!(window.next_start, None);
    }
}
