//! Cell merge resolution.
//!
//! Adjacent cells with the same trimmed text can be drawn as one span. The
//! decision is made once per render pass, on the text as ingested (before
//! wrapping), scanning rows top to bottom and columns left to right.
//!
//! - **Horizontal**: runs of identical cells within a row.
//! - **Vertical**: runs of identical cells within a column.
//! - **Hierarchical**: vertical runs that may only continue while every
//!   column to the left continues its own run, giving an outline layout.
//! - **Both**: horizontal runs first; vertical runs then compare whole
//!   horizontal groups, which must have the same extent in both rows.
//!
//! Empty cells never merge.

use tracing::debug;

use super::types::{MergeMode, MergeSpan, MergeState};

/// Compute the merge state of every cell in `rows`.
///
/// The result has one row per input row and as many columns as the widest
/// row; missing cells count as empty.
pub fn resolve_merges<S: AsRef<str>>(rows: &[Vec<S>], mode: MergeMode) -> Vec<Vec<MergeState>> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut states = vec![vec![MergeState::default(); columns]; rows.len()];
    if mode == MergeMode::None || rows.is_empty() {
        return states;
    }

    let key = |r: usize, c: usize| rows[r].get(c).map_or("", |s| s.as_ref().trim());

    let units: Vec<Vec<(usize, usize)>> = (0..rows.len())
        .map(|r| {
            if mode.horizontal() {
                horizontal_runs(columns, |c| key(r, c))
            } else {
                (0..columns).map(|c| (c, 1)).collect()
            }
        })
        .collect();

    if mode.horizontal() {
        for (r, row_units) in units.iter().enumerate() {
            for &(start, span) in row_units.iter().filter(|(_, span)| *span > 1) {
                for offset in 0..span {
                    states[r][start + offset].horizontal = MergeSpan::member(offset, span);
                }
            }
        }
    }

    if mode.vertical() {
        for r in 0..rows.len() {
            for &(start, span) in &units[r] {
                let text = key(r, start);
                if text.is_empty() || states[r][start].vertical.present {
                    continue;
                }
                let mut last = r;
                while last + 1 < rows.len()
                    && units[last + 1].contains(&(start, span))
                    && key(last + 1, start) == text
                {
                    last += 1;
                }
                let height = last - r + 1;
                if height < 2 {
                    continue;
                }
                for (offset, row) in states[r..=last].iter_mut().enumerate() {
                    for cell in &mut row[start..start + span] {
                        cell.vertical = MergeSpan::member(offset, height);
                    }
                }
            }
        }
    }

    if mode.hierarchical() {
        // joined[r][c]: row r continues row r - 1 in column c.
        let mut joined = vec![vec![false; columns]; rows.len()];
        for c in 0..columns {
            for r in 1..rows.len() {
                let text = key(r, c);
                joined[r][c] = !text.is_empty()
                    && text == key(r - 1, c)
                    && joined[r][..c].iter().all(|j| *j);
            }
        }
        for c in 0..columns {
            let mut r = 0;
            while r < rows.len() {
                let mut last = r;
                while last + 1 < rows.len() && joined[last + 1][c] {
                    last += 1;
                }
                let height = last - r + 1;
                if height > 1 {
                    for (offset, row) in states[r..=last].iter_mut().enumerate() {
                        row[c].hierarchical = MergeSpan::member(offset, height);
                    }
                }
                r = last + 1;
            }
        }
    }

    debug!(
        ?mode,
        rows = rows.len(),
        columns,
        spans = count_spans(&states),
        "resolved cell merges"
    );
    states
}

/// Runs of identical non-empty cells in one row, as `(start, span)` pairs
/// covering every column exactly once.
fn horizontal_runs<'a>(columns: usize, key: impl Fn(usize) -> &'a str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut c = 0;
    while c < columns {
        let text = key(c);
        let mut span = 1;
        if !text.is_empty() {
            while c + span < columns && key(c + span) == text {
                span += 1;
            }
        }
        runs.push((c, span));
        c += span;
    }
    runs
}

/// Drawn units of a row after horizontal merging, as `(start, span)` pairs.
///
/// The spans always add up to the number of cells in the row.
pub fn horizontal_groups(row: &[MergeState]) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut c = 0;
    while c < row.len() {
        let span = row[c].column_span().min(row.len() - c);
        groups.push((c, span));
        c += span;
    }
    groups
}

fn count_spans(states: &[Vec<MergeState>]) -> usize {
    states
        .iter()
        .flatten()
        .filter(|s| {
            (s.horizontal.present && s.horizontal.start)
                || (s.vertical.present && s.vertical.start)
                || (s.hierarchical.present && s.hierarchical.start)
        })
        .count()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn horizontal_groups_cover_every_column_once(
            rows in prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!["", "a", "b"]), 4),
                1..6,
            ),
        ) {
            for mode in [MergeMode::Horizontal, MergeMode::Both] {
                let states = resolve_merges(&rows, mode);
                for row in &states {
                    let groups = horizontal_groups(row);
                    let total: usize = groups.iter().map(|(_, span)| span).sum();
                    prop_assert_eq!(total, row.len());
                    for (start, span) in groups {
                        if span > 1 {
                            let members = &row[start..start + span];
                            let starts = members.iter().filter(|s| s.horizontal.start).count();
                            let ends = members.iter().filter(|s| s.horizontal.end).count();
                            prop_assert_eq!(starts, 1);
                            prop_assert_eq!(ends, 1);
                        }
                    }
                }
            }
        }
    }
}
