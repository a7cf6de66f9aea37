//! Convenient imports for building tables.
//!
//! ```rust
//! use standout_table::prelude::*;
//!
//! let config = Config::new().wrap(WrapMode::Truncate);
//! let mut table = Table::with_config(Vec::new(), config)
//!     .renderer(BorderRenderer::new(BorderStyle::Ascii));
//! table.append(["a", "b"]).unwrap();
//! table.render().unwrap();
//! ```

pub use crate::config::{Config, SectionConfig};
pub use crate::error::{Result, TableError};
pub use crate::layout::{Align, MergeMode, Padding, Position, WrapMode};
pub use crate::renderer::{BorderRenderer, BorderStyle, MarkdownRenderer, Renderer};
pub use crate::table::Table;
pub use crate::traits::TableRow;
