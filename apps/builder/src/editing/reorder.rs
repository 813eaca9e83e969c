//! Reorder engine: index-based moves on the section order and on any
//! ordered list in the document.
//!
//! A move removes the element at `from` and reinserts it at `to`, so the
//! elements between the two positions shift by one. `from == to` returns an
//! unchanged copy.

use crate::document::ResumeDocument;
use crate::editing::list::{with_list, ListPath, OrderedList};
use crate::errors::ReorderError;

/// Moves a section within `layout.sectionOrder`. The result is always a
/// permutation of the input order.
pub fn move_section(
    doc: &ResumeDocument,
    from: usize,
    to: usize,
) -> Result<ResumeDocument, ReorderError> {
    let mut next = doc.clone();
    move_within(next.layout.order_mut(), "layout.sectionOrder", from, to)?;
    Ok(next)
}

/// Moves an element within the list at `path`. Record ids travel with the
/// record.
pub fn move_list_item(
    doc: &ResumeDocument,
    path: ListPath,
    from: usize,
    to: usize,
) -> Result<ResumeDocument, ReorderError> {
    let mut next = doc.clone();
    let list = path.to_string();
    with_list(&mut next, path, |items| move_within(items, &list, from, to))??;
    Ok(next)
}

fn move_within(
    items: &mut dyn OrderedList,
    list: &str,
    from: usize,
    to: usize,
) -> Result<(), ReorderError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(ReorderError::OutOfRange {
            list: list.to_string(),
            from,
            to,
            len,
        });
    }
    if from != to {
        items.move_item(from, to);
    }
    Ok(())
}
