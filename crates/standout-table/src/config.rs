//! Table configuration.
//!
//! [`Config`] gathers every option the layout engine consumes. It can be
//! built fluently or loaded from YAML/JSON:
//!
//! ```rust
//! use standout_table::{Config, MergeMode, WrapMode};
//!
//! let config = Config::from_yaml(r#"
//! max_width: 60
//! tab_width: 4
//! widths:
//!   0: 12
//! body:
//!   wrap: truncate
//!   merge: vertical
//! "#).unwrap();
//!
//! assert_eq!(config.max_width, 60);
//! assert_eq!(config.body.wrap, WrapMode::Truncate);
//! assert_eq!(config.body.merge, MergeMode::Vertical);
//!
//! let config = Config::new()
//!     .max_width(60)
//!     .column_width(0, 12)
//!     .body(Config::section().merge(MergeMode::Vertical));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::layout::{Align, MergeMode, Measurer, Padding, Position, WrapMode, DEFAULT_TAB_WIDTH};

/// Options that can differ between header, body and footer.
///
/// Unset fields fall back per section: alignment defaults to center for
/// the header, left for the body and right for the footer; auto-format is
/// on for the header only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// How text is fitted into the column width.
    pub wrap: WrapMode,
    /// Which identical neighbours merge.
    pub merge: MergeMode,
    /// Alignment for every column of the section.
    pub align: Align,
    /// Alignment overrides by column index.
    pub column_align: HashMap<usize, Align>,
    /// Upper-case the text and turn `_` into spaces.
    pub auto_format: Option<bool>,
    /// Wrap width caps by column index, local to this section.
    ///
    /// The shared column width is unchanged; narrower content is padded.
    pub max_widths: HashMap<usize, usize>,
}

impl SectionConfig {
    /// Set the wrap mode.
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the merge mode.
    pub fn merge(mut self, merge: MergeMode) -> Self {
        self.merge = merge;
        self
    }

    /// Set the section alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Override the alignment of one column.
    pub fn column_align(mut self, column: usize, align: Align) -> Self {
        self.column_align.insert(column, align);
        self
    }

    /// Enable or disable header-style formatting.
    pub fn auto_format(mut self, enabled: bool) -> Self {
        self.auto_format = Some(enabled);
        self
    }

    /// Cap the wrap width of one column in this section.
    pub fn max_width(mut self, column: usize, width: usize) -> Self {
        self.max_widths.insert(column, width);
        self
    }

    /// Resolved alignment of `column` in a section at `position`.
    pub fn align_for(&self, column: usize, position: Position) -> Align {
        let section_default = match position {
            Position::Header => Align::Center,
            Position::Body => Align::Left,
            Position::Footer => Align::Right,
        };
        self.column_align
            .get(&column)
            .copied()
            .unwrap_or(Align::None)
            .or(self.align)
            .or(section_default)
    }

    /// Whether text in a section at `position` is auto-formatted.
    pub fn auto_formats(&self, position: Position) -> bool {
        self.auto_format.unwrap_or(position == Position::Header)
    }
}

/// Complete configuration for laying out and rendering a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Header section options.
    pub header: SectionConfig,
    /// Body section options.
    pub body: SectionConfig,
    /// Footer section options.
    pub footer: SectionConfig,
    /// Cap on the total table width; 0 means no cap.
    pub max_width: usize,
    /// Explicit content widths by column index.
    pub widths: HashMap<usize, usize>,
    /// Padding for every column.
    pub padding: Padding,
    /// Padding overrides by column index.
    pub column_padding: HashMap<usize, Padding>,
    /// Draw a one-column separator between adjacent columns.
    pub column_separator: bool,
    /// Distance between tab stops.
    pub tab_width: usize,
    /// Trim surrounding whitespace from every line of cell text.
    pub trim_space: bool,
    /// Replace tabs with spaces before measuring and wrapping.
    pub trim_tab: bool,
    /// Reject rows wider than the header instead of adding columns.
    pub strict: bool,
    /// Emit rows as they are appended instead of buffering the table.
    pub stream: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            header: SectionConfig::default(),
            body: SectionConfig::default(),
            footer: SectionConfig::default(),
            max_width: 0,
            widths: HashMap::new(),
            padding: Padding::default(),
            column_padding: HashMap::new(),
            column_separator: true,
            tab_width: DEFAULT_TAB_WIDTH,
            trim_space: true,
            trim_tab: true,
            strict: false,
            stream: false,
        }
    }
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a section configuration, for use with [`Config::header`] and friends.
    pub fn section() -> SectionConfig {
        SectionConfig::default()
    }

    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the header section options.
    pub fn header(mut self, section: SectionConfig) -> Self {
        self.header = section;
        self
    }

    /// Set the body section options.
    pub fn body(mut self, section: SectionConfig) -> Self {
        self.body = section;
        self
    }

    /// Set the footer section options.
    pub fn footer(mut self, section: SectionConfig) -> Self {
        self.footer = section;
        self
    }

    /// Set the wrap mode of every section.
    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.header.wrap = wrap;
        self.body.wrap = wrap;
        self.footer.wrap = wrap;
        self
    }

    /// Cap the total table width (0 removes the cap).
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Fix the content width of one column.
    pub fn column_width(mut self, column: usize, width: usize) -> Self {
        self.widths.insert(column, width);
        self
    }

    /// Set the padding of every column.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Override the padding of one column.
    pub fn column_padding(mut self, column: usize, padding: Padding) -> Self {
        self.column_padding.insert(column, padding);
        self
    }

    /// Enable or disable separators between columns.
    pub fn column_separator(mut self, enabled: bool) -> Self {
        self.column_separator = enabled;
        self
    }

    /// Set the distance between tab stops.
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Enable or disable whitespace trimming.
    pub fn trim_space(mut self, enabled: bool) -> Self {
        self.trim_space = enabled;
        self
    }

    /// Enable or disable tab expansion.
    pub fn trim_tab(mut self, enabled: bool) -> Self {
        self.trim_tab = enabled;
        self
    }

    /// Enable or disable strict column counting.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Enable or disable streaming output.
    pub fn stream(mut self, enabled: bool) -> Self {
        self.stream = enabled;
        self
    }

    /// Options for the section at `position`.
    pub fn section_for(&self, position: Position) -> &SectionConfig {
        match position {
            Position::Header => &self.header,
            Position::Body => &self.body,
            Position::Footer => &self.footer,
        }
    }

    /// Mutable options for the section at `position`.
    pub fn section_for_mut(&mut self, position: Position) -> &mut SectionConfig {
        match position {
            Position::Header => &mut self.header,
            Position::Body => &mut self.body,
            Position::Footer => &mut self.footer,
        }
    }

    /// Padding of `column`.
    pub fn padding_for(&self, column: usize) -> Padding {
        self.column_padding
            .get(&column)
            .copied()
            .unwrap_or(self.padding)
    }

    /// Width taken by one column separator.
    pub fn separator_width(&self) -> usize {
        usize::from(self.column_separator)
    }

    /// A width measurer using the configured tab stops.
    pub fn measurer(&self) -> Measurer {
        Measurer::new(self.tab_width)
    }

    /// Check the options that can be validated without any table content.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTabWidth`] for a tab width of 0.
    /// - [`TableError::InvalidColumnWidth`] for an explicit or section width
    ///   below 1 (reported for the lowest offending column).
    pub fn validate(&self) -> Result<()> {
        if self.tab_width == 0 {
            return Err(TableError::InvalidTabWidth);
        }
        let sections = [&self.header, &self.body, &self.footer];
        let mut invalid: Vec<(usize, usize)> = self
            .widths
            .iter()
            .chain(sections.iter().flat_map(|s| s.max_widths.iter()))
            .filter(|(_, width)| **width < 1)
            .map(|(column, width)| (*column, *width))
            .collect();
        invalid.sort_unstable();
        match invalid.first() {
            Some(&(column, width)) => Err(TableError::InvalidColumnWidth { column, width }),
            None => Ok(()),
        }
    }
}
