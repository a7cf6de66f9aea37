//! Column width resolution.
//!
//! This module turns measured cell content, explicit per-column widths and
//! an optional cap on the total table width into one width per column. The
//! resolved widths are content widths: padding and separators come on top.
//!
//! Resolution runs in three steps:
//!
//! 1. Each column's natural width is the widest content any row puts in it
//!    (header, body and footer all contribute).
//! 2. Explicit overrides replace the natural width, even when that means the
//!    content will be wrapped or truncated.
//! 3. When the total (content + padding + separators) exceeds the cap, the
//!    columns without an override shrink. They first shrink toward their
//!    minimum width (the narrowest width that loses no content) and then
//!    toward 1. Within each phase the deficit is split in proportion to each
//!    column's slack above its floor, so wide columns give up the most; the
//!    units left over by integer division come one at a time from the column
//!    with the most remaining slack, lowest index first.

use std::collections::HashMap;

use tracing::debug;

use super::types::WrapMode;
use super::width::Measurer;
use crate::error::{Result, TableError};

/// Resolved widths for all columns in a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width for each column in display columns.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific column.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all columns (without padding or separators).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Sum of the widths of `span` columns starting at `start`.
    pub fn span_total(&self, start: usize, span: usize) -> usize {
        self.widths.iter().skip(start).take(span).sum()
    }
}

impl From<Vec<usize>> for ResolvedWidths {
    fn from(widths: Vec<usize>) -> Self {
        ResolvedWidths { widths }
    }
}

/// Accumulates content measurements and resolves them into [`ResolvedWidths`].
///
/// # Example
///
/// ```rust
/// use standout_table::layout::{Measurer, WidthResolver, WrapMode};
///
/// let header = vec![vec!["NAME".to_string(), "AGE".to_string()]];
/// let body = vec![vec!["Alice".to_string(), "30".to_string()]];
///
/// let mut resolver = WidthResolver::new(Measurer::default(), 2);
/// resolver.measure(&header, WrapMode::Normal);
/// resolver.measure(&body, WrapMode::Normal);
/// let widths = resolver.resolve().unwrap();
/// assert_eq!(widths.widths, vec![5, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct WidthResolver {
    measurer: Measurer,
    natural: Vec<usize>,
    minimum: Vec<usize>,
    overrides: HashMap<usize, usize>,
    padding: Vec<usize>,
    separator_width: usize,
    max_width: usize,
}

impl WidthResolver {
    /// Create a resolver for `columns` columns with no measurements yet.
    pub fn new(measurer: Measurer, columns: usize) -> Self {
        WidthResolver {
            measurer,
            natural: vec![0; columns],
            minimum: vec![0; columns],
            overrides: HashMap::new(),
            padding: vec![0; columns],
            separator_width: 0,
            max_width: 0,
        }
    }

    /// Number of columns being resolved.
    pub fn columns(&self) -> usize {
        self.natural.len()
    }

    /// Measure rows of cell text wrapped with `wrap`.
    ///
    /// Rows shorter than the column count simply contribute nothing to the
    /// missing columns; cells beyond the column count are ignored.
    pub fn measure<S: AsRef<str>>(&mut self, rows: &[Vec<S>], wrap: WrapMode) -> &mut Self {
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(self.natural.len()) {
                let text = cell.as_ref();
                let natural = self.measurer.display_width(text);
                let minimum = self.measurer.minimum_width(text, wrap);
                self.natural[i] = self.natural[i].max(natural);
                self.minimum[i] = self.minimum[i].max(minimum);
            }
        }
        self
    }

    /// Explicit widths by column index; they win over measured content.
    pub fn overrides(&mut self, overrides: &HashMap<usize, usize>) -> &mut Self {
        self.overrides = overrides.clone();
        self
    }

    /// Horizontal padding (left + right) for each column.
    pub fn padding(&mut self, padding: Vec<usize>) -> &mut Self {
        self.padding = padding;
        self.padding.resize(self.natural.len(), 0);
        self
    }

    /// Width of one separator between adjacent columns (0 when disabled).
    pub fn separator_width(&mut self, width: usize) -> &mut Self {
        self.separator_width = width;
        self
    }

    /// Cap on the total table width; 0 disables the cap.
    pub fn max_width(&mut self, width: usize) -> &mut Self {
        self.max_width = width;
        self
    }

    /// Natural (content) width measured for each column.
    pub fn natural_widths(&self) -> &[usize] {
        &self.natural
    }

    /// Padding and separators, everything that is not column content.
    pub fn overhead(&self) -> usize {
        let separators = self.natural.len().saturating_sub(1) * self.separator_width;
        self.padding.iter().sum::<usize>() + separators
    }

    /// Resolve the final width of every column.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidColumnWidth`] when an override is below 1.
    /// - [`TableError::GlobalWidthTooSmall`] when the cap cannot fit every
    ///   overridden column plus one column of content for all the others.
    pub fn resolve(&self) -> Result<ResolvedWidths> {
        let mut invalid: Vec<(usize, usize)> = self
            .overrides
            .iter()
            .filter(|(_, width)| **width < 1)
            .map(|(column, width)| (*column, *width))
            .collect();
        invalid.sort_unstable();
        if let Some(&(column, width)) = invalid.first() {
            return Err(TableError::InvalidColumnWidth { column, width });
        }

        let columns = self.natural.len();
        let flexible: Vec<bool> = (0..columns)
            .map(|i| !self.overrides.contains_key(&i))
            .collect();
        let mut widths: Vec<usize> = (0..columns)
            .map(|i| match self.overrides.get(&i) {
                Some(&w) => w,
                None => self.natural[i].max(1),
            })
            .collect();

        if self.max_width > 0 && columns > 0 {
            let overhead = self.overhead();
            let required = overhead
                + (0..columns)
                    .map(|i| if flexible[i] { 1 } else { widths[i] })
                    .sum::<usize>();
            if self.max_width < required {
                return Err(TableError::GlobalWidthTooSmall {
                    max_width: self.max_width,
                    required,
                });
            }

            let total = widths.iter().sum::<usize>() + overhead;
            if total > self.max_width {
                let minimum: Vec<usize> = (0..columns)
                    .map(|i| self.minimum[i].clamp(1, widths[i]))
                    .collect();
                let ones = vec![1; columns];
                let excess = total - self.max_width;
                let excess = shrink(&mut widths, &minimum, &flexible, excess);
                let excess = shrink(&mut widths, &ones, &flexible, excess);
                debug!(
                    before = total,
                    after = widths.iter().sum::<usize>() + overhead,
                    max_width = self.max_width,
                    unresolved = excess,
                    "scaled columns to fit table width"
                );
            }
        }

        debug!(natural = ?self.natural, resolved = ?widths, "resolved column widths");
        Ok(ResolvedWidths { widths })
    }
}

/// Take up to `excess` columns from the flexible columns without going below
/// `floors`. Returns the part of `excess` that could not be taken.
fn shrink(widths: &mut [usize], floors: &[usize], flexible: &[bool], excess: usize) -> usize {
    let mut slack: Vec<usize> = widths
        .iter()
        .zip(floors)
        .zip(flexible)
        .map(|((w, f), &flex)| if flex { w.saturating_sub(*f) } else { 0 })
        .collect();
    let total_slack: usize = slack.iter().sum();
    if excess == 0 || total_slack == 0 {
        return excess;
    }

    let take = excess.min(total_slack);
    let mut taken = 0;
    for (width, s) in widths.iter_mut().zip(slack.iter_mut()) {
        let cut = take * *s / total_slack;
        *width -= cut;
        *s -= cut;
        taken += cut;
    }

    let mut remaining = take - taken;
    while remaining > 0 {
        let Some(index) = slack
            .iter()
            .enumerate()
            .filter(|(_, s)| **s > 0)
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(i, _)| i)
        else {
            break;
        };
        widths[index] -= 1;
        slack[index] -= 1;
        remaining -= 1;
    }

    excess - take + remaining
}
