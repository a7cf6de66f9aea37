//! Output backends.
//!
//! A [`Renderer`] turns formatting contexts into text. The table drives it
//! in a fixed order: [`begin`](Renderer::begin), then rules and lines from
//! top to bottom, then [`end`](Renderer::end). Rules are offered at every
//! boundary (see [`RuleKind`](crate::layout::RuleKind)); a renderer that has
//! nothing to draw there simply writes nothing.
//!
//! Two backends are provided:
//!
//! - [`BorderRenderer`]: box-drawing tables in several [`BorderStyle`]s.
//! - [`MarkdownRenderer`]: GitHub-flavoured Markdown tables.

mod border;
mod markdown;

pub use border::{BorderRenderer, BorderStyle};
pub use markdown::MarkdownRenderer;

use std::io::{self, Write};

use crate::layout::{LineContext, ResolvedWidths, RuleContext};

/// A backend that writes formatted tables to a sink.
///
/// Only [`line`](Renderer::line) and [`rule`](Renderer::rule) are required;
/// the section-specific hooks default to `line`.
pub trait Renderer {
    /// Called once before anything else is written.
    fn begin(&mut self, _out: &mut dyn Write, _widths: &ResolvedWidths) -> io::Result<()> {
        Ok(())
    }

    /// Write one display line.
    fn line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()>;

    fn header_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        self.line(out, ctx)
    }

    fn body_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        self.line(out, ctx)
    }

    fn footer_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        self.line(out, ctx)
    }

    /// Write the horizontal rule for a boundary, or nothing.
    fn rule(&mut self, out: &mut dyn Write, ctx: &RuleContext<'_>) -> io::Result<()>;

    /// Called once after the last line.
    fn end(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn begin(&mut self, out: &mut dyn Write, widths: &ResolvedWidths) -> io::Result<()> {
        (**self).begin(out, widths)
    }

    fn line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        (**self).line(out, ctx)
    }

    fn header_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        (**self).header_line(out, ctx)
    }

    fn body_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        (**self).body_line(out, ctx)
    }

    fn footer_line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        (**self).footer_line(out, ctx)
    }

    fn rule(&mut self, out: &mut dyn Write, ctx: &RuleContext<'_>) -> io::Result<()> {
        (**self).rule(out, ctx)
    }

    fn end(&mut self, out: &mut dyn Write) -> io::Result<()> {
        (**self).end(out)
    }
}
