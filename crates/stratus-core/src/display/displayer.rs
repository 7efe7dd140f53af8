use chrono::Utc;
use std::io::Write;
use std::time::Instant;

use super::grid;
use super::options::{DisplayOptions, Format, Source};
use super::porcelain;
use super::render::{Render, Renderer, View};
use super::tree;
use crate::errors::{Result, StratusError};
use crate::{log_op_end, log_op_error, log_op_start};

/// Options bound to one source, ready to print
///
/// Built by [`DisplayOptions::build`]. Printing never mutates the source, so
/// independent displayers over the same graph may run in parallel.
#[derive(Debug, Clone)]
pub struct Displayer<'a> {
    options: DisplayOptions,
    source: Source<'a>,
}

impl<'a> Displayer<'a> {
    pub(crate) fn new(options: DisplayOptions, source: Source<'a>) -> Self {
        Self { options, source }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Extract the format-agnostic view for the configured source and mode
    fn view(&self) -> Result<View> {
        let options = &self.options;
        let now = options.now.unwrap_or_else(Utc::now);

        if options.format == Format::Tree {
            let root = options
                .root_node
                .as_ref()
                .ok_or(StratusError::MissingRootNode)?;
            return Ok(View::Tree(tree::build(self.source, root)?));
        }

        if options.format == Format::Porcelain && options.ids_only {
            return Ok(View::Ids(match self.source {
                Source::Graph(g) => porcelain::graph_ids(g),
                Source::Diff(d) => porcelain::diff_ids(d),
            }));
        }

        Ok(View::Grid(match self.source {
            Source::Graph(g) if !options.headers.is_empty() => grid::columnar(g, options, now),
            Source::Graph(g) => grid::property_listing(g, options),
            Source::Diff(d) => grid::diff_listing(d, options),
        }))
    }

    /// Render the whole report to a string
    pub fn render(&self) -> Result<String> {
        let view = self.view()?;
        Renderer::for_options(&self.options).render(&view)
    }

    /// Render and write to `w`
    ///
    /// Nothing is written when rendering fails.
    ///
    /// # Errors
    /// * `MissingRootNode` / `RootNotFound` - tree configuration problems
    /// * `Io` - the sink rejected the write
    pub fn print<W: Write>(&self, w: &mut W) -> Result<()> {
        let format = self.options.format;
        log_op_start!("display_print", format = format.as_str());
        let start = Instant::now();

        let result = self.render().and_then(|out| {
            w.write_all(out.as_bytes())?;
            Ok(out.lines().count())
        });

        match result {
            Ok(line_count) => {
                log_op_end!(
                    "display_print",
                    duration_ms = start.elapsed().as_millis() as u64,
                    format = format.as_str(),
                    row_count = line_count
                );
                Ok(())
            }
            Err(e) => {
                log_op_error!(
                    "display_print",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(e)
            }
        }
    }
}
