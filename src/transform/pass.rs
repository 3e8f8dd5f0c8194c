//! The pixel-transform pass over serialized rows.

use std::sync::Arc;

use super::registry::PixelTransform;
use crate::ansi::{pad_to_width, slice_columns, string_width};

/// Apply `transforms`, in order, to composited rows.
///
/// For every row a transform's range touches, the covered span is cut out
/// (by visual column, escape-safe), passed to the transform, fitted back to
/// its original width and spliced in place. Each transform sees the rows as
/// rewritten by the ones before it. A row never changes width.
pub fn apply_pixel_transforms(rows: &mut [String], transforms: &[Arc<PixelTransform>]) {
    for transform in transforms {
        let range = transform.range();
        let last_row = range.end().y.min(rows.len().saturating_sub(1));

        for y in range.start().y..=last_row {
            let Some(row) = rows.get_mut(y) else {
                break;
            };
            let row_width = string_width(row);
            if let Some((from, to)) = range.span_on_row(y, row_width) {
                *row = rewrite_span(row, row_width, from, to, transform);
            }
        }
    }
}

/// Rewrite the inclusive column span `from..=to` of `row`.
fn rewrite_span(
    row: &str,
    row_width: usize,
    from: usize,
    to: usize,
    transform: &PixelTransform,
) -> String {
    let before = slice_columns(row, 0, from);
    let target = slice_columns(row, from, to + 1);
    let after = slice_columns(row, to + 1, row_width);

    let target_width = string_width(&target);
    if target_width == 0 {
        return row.to_owned();
    }

    let replaced = pad_to_width(transform.apply(&target), target_width);

    let mut out = String::with_capacity(before.len() + replaced.len() + after.len());
    out.push_str(&before);
    out.push_str(&replaced);
    out.push_str(&after);
    out
}
