//! Resilient page assembly.
//!
//! Resolution and validation failures must not starve a page: as long as
//! more source records exist, the assembler keeps pulling further windows
//! until the page is full or the collection is exhausted. Failed records
//! are reported alongside the items, never silently dropped.

use crate::error::Result;
use crate::fields::PathSpec;
use crate::paginate::paginate;
use crate::resolve::{resolve_record, HotelRecord, ResolutionFailure, ResolvedRecord};
use crate::schema::SchemaView;
use std::sync::Arc;

/// One assembled page.
#[derive(Debug, Default)]
pub struct Page {
    /// Successfully resolved and validated records, in window order.
    pub items: Vec<ResolvedRecord>,
    /// Per-record failures encountered while filling the page.
    pub errors: Vec<ResolutionFailure>,
    /// Raw cursor for the next page; absent when the collection is
    /// exhausted. Turning this into a link is the caller's concern.
    pub next_start: Option<String>,
}

/// Assemble a page of up to `limit` resolved records starting after
/// `start_with`.
///
/// Written as an accumulator loop rather than recursion: every round
/// strictly advances the cursor, so the loop terminates once the page is
/// full or the collection runs out. Records within a window are resolved
/// strictly sequentially to preserve the window order.
pub async fn fill_page(
    records: &[Arc<dyn HotelRecord>],
    spec: &PathSpec,
    view: &SchemaView,
    limit: i64,
    start_with: Option<&str>,
) -> Result<Page> {
    let mut page = Page::default();
    let mut cursor = start_with.map(str::to_string);

    loop {
        let want = limit - page.items.len() as i64;
        let window = paginate(records, want, cursor.as_deref(), |r| r.address())?;

        let mut round_errors = 0usize;
        for record in window.items {
            match resolve_record(record.as_ref(), &spec.to_flatten, &spec.on_index).await {
                Ok(resolved) => match view.validate(&resolved) {
                    Ok(()) => page.items.push(resolved),
                    Err(failure) => {
                        round_errors += 1;
                        page.errors.push(ResolutionFailure::from_validation(
                            &failure,
                            resolved,
                        ));
                    }
                },
                Err(failure) => {
                    round_errors += 1;
                    page.errors.push(failure);
                }
            }
        }

        page.next_start = window.next_start;

        // Backfill only while this round lost records, the page is still
        // short and more source records exist.
        let full = page.items.len() as i64 >= limit;
        match &page.next_start {
            Some(next) if round_errors > 0 && !full => cursor = Some(next.clone()),
            _ => break,
        }
    }

    Ok(page)
}
