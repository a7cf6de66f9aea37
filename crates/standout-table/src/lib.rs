//! # Standout Table - Table Layout for Terminal Output
//!
//! `standout-table` lays out rows of text as tables. It measures cell text
//! the way a terminal draws it, settles on one width per column, wraps or
//! truncates what does not fit, merges identical neighbouring cells and
//! hands every display line to a pluggable [`Renderer`].
//!
//! ## Core Concepts
//!
//! - [`Table`]: Accumulates header, body and footer rows and writes them to
//!   any [`std::io::Write`] sink, in one batch or as a stream
//! - [`Config`]: Every layout option, buildable in code or loaded from YAML/JSON
//! - [`layout`]: The engine itself: width measurement, wrapping, width
//!   resolution, merging and per-line formatting contexts
//! - [`Renderer`]: The backend contract, with [`BorderRenderer`] and
//!   [`MarkdownRenderer`] provided
//!
//! ## Quick Start
//!
//! ```rust
//! use standout_table::{Config, Table};
//!
//! let mut table = Table::with_config(Vec::new(), Config::new().max_width(40));
//! table.header(["Name", "Role"]).unwrap();
//! table.append(["Alice", "Engineer"]).unwrap();
//! table.append(["Bob", "Designer"]).unwrap();
//! table.render().unwrap();
//!
//! let output = String::from_utf8(table.into_inner()).unwrap();
//! assert!(output.contains("│ Alice │ Engineer │"));
//! ```
//!
//! ## Widths
//!
//! Each column is as wide as its widest cell across all sections, unless a
//! width is set explicitly. With a table width cap, columns without an
//! explicit width shrink in proportion to their slack, first down to the
//! width of their longest word, then further if needed. The cap covers
//! content, padding and column separators; outer borders come on top.
//!
//! ```rust
//! use standout_table::{BorderRenderer, BorderStyle, Config, Table};
//!
//! let config = Config::new().max_width(20);
//! let mut table = Table::with_config(Vec::new(), config)
//!     .renderer(BorderRenderer::new(BorderStyle::None));
//! table.append(["the quick brown fox", "jumps"]).unwrap();
//! table.render().unwrap();
//!
//! let output = String::from_utf8(table.into_inner()).unwrap();
//! for line in output.lines() {
//!     assert_eq!(console::measure_text_width(line), 20);
//! }
//! ```
//!
//! ## Merging
//!
//! ```rust
//! use standout_table::{Config, MergeMode, Table};
//!
//! let config = Config::new().body(Config::section().merge(MergeMode::Vertical));
//! let mut table = Table::with_config(Vec::new(), config);
//! table.append(["fruit", "apple"]).unwrap();
//! table.append(["fruit", "pear"]).unwrap();
//! table.render().unwrap();
//!
//! let output = String::from_utf8(table.into_inner()).unwrap();
//! assert_eq!(output.matches("fruit").count(), 1);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use standout_table::{Config, Table};
//!
//! let mut table = Table::with_config(Vec::new(), Config::new().stream(true));
//! table.header(["id", "status"]).unwrap();
//! table.append(["1", "ok"]).unwrap(); // written immediately
//! table.close().unwrap();
//! ```

pub mod config;
mod error;
pub mod layout;
pub mod prelude;
pub mod renderer;
mod table;
mod traits;

pub use config::{Config, SectionConfig};
pub use error::{Result, TableError};
pub use layout::{Align, MergeMode, Padding, Position, WrapMode};
pub use renderer::{BorderRenderer, BorderStyle, MarkdownRenderer, Renderer};
pub use table::Table;
pub use traits::TableRow;
