//! Property-based tests for whole tables using proptest.

use proptest::prelude::*;
use standout_table::{BorderRenderer, BorderStyle, Config, MergeMode, Table};

// ============================================================================
// Strategies
// ============================================================================

/// A column count, rows of that many cells, and a width cap that can hold them.
fn table_strategy() -> impl Strategy<Value = (Vec<Vec<String>>, usize)> {
    (1usize..5).prop_flat_map(|columns| {
        let rows = prop::collection::vec(
            prop::collection::vec("[a-z ]{0,14}", columns),
            1..6,
        );
        // every column needs 1 of content, 2 of padding and a separator
        (rows, (columns * 4)..60)
    })
}

fn render(config: Config, rows: &[Vec<String>]) -> String {
    let mut table =
        Table::with_config(Vec::new(), config).renderer(BorderRenderer::new(BorderStyle::Ascii));
    for row in rows {
        table.append(row).unwrap();
    }
    table.render().unwrap();
    String::from_utf8(table.into_inner()).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn lines_have_equal_width_within_cap((rows, max_width) in table_strategy()) {
        let output = render(Config::new().max_width(max_width), &rows);
        let widths: Vec<usize> = output.lines().map(console::measure_text_width).collect();

        prop_assert!(!widths.is_empty());
        prop_assert!(widths.iter().all(|w| *w == widths[0]));
        // the cap excludes the two outer border columns
        prop_assert!(widths[0] <= max_width + 2);
    }

    #[test]
    fn merging_never_changes_table_width((rows, max_width) in table_strategy()) {
        let plain = render(Config::new().max_width(max_width), &rows);
        let merged = render(
            Config::new()
                .max_width(max_width)
                .body(Config::section().merge(MergeMode::Both)),
            &rows,
        );

        let first = |s: &str| s.lines().next().map(console::measure_text_width);
        prop_assert_eq!(first(&plain), first(&merged));
    }
}
