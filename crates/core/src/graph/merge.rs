use super::column::{Column, Slot};

/// Coalesce adjacent columns that continue the previous column's stack.
///
/// For each column, depths are compared top-down against the previous
/// column. While the location matches, the slot becomes a reference to the
/// column owning the canonical frame and its times are folded into that
/// frame. The first mismatch ends the comparison: anything deeper belongs to
/// a different call path, even when a deeper frame happens to match.
pub fn merge_columns(columns: &mut [Column]) {
    for x in 1..columns.len() {
        let (done, rest) = columns.split_at_mut(x);
        let current = &mut rest[0];

        for y in 0..current.rows.len() {
            let canonical_column = match done[x - 1].rows.get(y) {
                Some(Slot::Ref(column)) => *column,
                Some(Slot::Frame(_)) => x - 1,
                None => break,
            };
            let Some(Slot::Frame(canonical)) = done[canonical_column].rows.get_mut(y) else {
                break;
            };
            let Slot::Frame(frame) = &current.rows[y] else {
                break;
            };
            if frame.location_id != canonical.location_id {
                break;
            }

            canonical.merge_in(frame);
            current.rows[y] = Slot::Ref(canonical_column);
        }
    }
}
