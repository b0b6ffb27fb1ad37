//! Section registry and runner.
//!
//! A [`Section`] is one named demonstration. [`Tour`] carries the output
//! sink, the loaded config and the deferred messages that print after the
//! final section, newest first.

use crate::config::TourConfig;
use crate::error::{Result, TourError};
use crate::{basics, collections, concurrency, error, imaging, reader, shapes};
use colored::Colorize;
use log::{debug, info};
use std::io::Write;

pub type SectionFn = fn(&mut Tour<'_>) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Section {
    pub name: &'static str,
    pub title: &'static str,
    pub run: SectionFn,
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish()
    }
}

const fn section(name: &'static str, title: &'static str, run: SectionFn) -> Section {
    Section { name, title, run }
}

/// Every section, in tour order.
pub const SECTIONS: &[Section] = &[
    section("imports", "Imports", basics::imports),
    section("exported-names", "Exported Names", basics::exported_names),
    section("functions", "Functions", basics::functions),
    section("multiple-results", "Multiple Results", basics::multiple_results),
    section("named-results", "Named Results", basics::named_results),
    section("variables", "Variables", basics::variables),
    section("basic-types", "Basic Types", basics::basic_types),
    section("zero-values", "Zero Values", basics::zero_values),
    section("type-conversions", "Type Conversions", basics::type_conversions),
    section("type-inference", "Type Inference", basics::type_inference),
    section("constants", "Constants", basics::constants),
    section("numeric-constants", "Numeric Constants", basics::numeric_constants),
    section("for", "For", basics::for_loop),
    section("while", "For as 'while'", basics::while_loop),
    section("if", "If", basics::if_statements),
    section("if-binding", "If With a Binding", basics::if_with_binding),
    section("if-else", "If and Else", basics::if_else),
    section("switch", "Match", basics::switch),
    section("switch-order", "Match Evaluation Order", basics::switch_order),
    section("switch-no-condition", "Match With Guards", basics::switch_no_condition),
    section("defer", "Stacking Defers", basics::stacking_defers),
    section("references", "References", basics::references),
    section("structs", "Structs", collections::structs),
    section("struct-fields", "Struct Fields", collections::struct_fields),
    section("struct-references", "References to Structs", collections::struct_references),
    section("struct-literals", "Struct Literals", collections::struct_literals),
    section("arrays", "Arrays", collections::arrays),
    section("slices", "Slices", collections::slices),
    section("slice-views", "Slices Are Views Into Arrays", collections::slice_views),
    section("slice-literals", "Slice Literals", collections::slice_literals),
    section("slice-defaults", "Slice Defaults", collections::slice_defaults),
    section("length-capacity", "Length and Capacity", collections::length_and_capacity),
    section("empty-slices", "Empty Slices", collections::empty_slices),
    section("with-capacity", "Vec::with_capacity", collections::with_capacity),
    section("slices-of-slices", "Slices of Slices", collections::slices_of_slices),
    section("appending", "Appending to a Vec", collections::appending),
    section("range", "Range", collections::range),
    section("maps", "Maps", collections::maps),
    section("map-literals", "Map Literals", collections::map_literals),
    section("mutating-maps", "Mutating Maps", collections::mutating_maps),
    section("function-values", "Function Values", basics::function_values),
    section("closures", "Function Closures", basics::closures),
    section("methods", "Methods", shapes::methods),
    section("methods-are-functions", "Methods are Functions", shapes::methods_are_functions),
    section("methods-newtypes", "Methods on Newtypes", shapes::methods_on_newtypes),
    section("mutable-receivers", "Mutable Receivers", shapes::mutable_receivers),
    section("traits", "Traits", shapes::traits),
    section("explicit-impls", "Traits Are Implemented Explicitly", shapes::explicit_impls),
    section("trait-values", "Trait Values", shapes::trait_values),
    section("any-values", "Any Values", shapes::any_values),
    section("downcasting", "Downcasting", shapes::downcasting),
    section("type-switches", "Type Switches", shapes::type_switches),
    section("stringers", "Display", shapes::stringers),
    section("errors", "Errors", errors),
    section("readers", "Readers", reader::readers),
    section("images", "Images", imaging::images),
    section("threads", "Threads", concurrency::threads),
    section("channels", "Channels", concurrency::channels),
    section("buffered-channels", "Buffered Channels", concurrency::buffered_channels),
    section("range-and-close", "Range and Close", concurrency::range_and_close),
    section("guarded-counter", "Mutex", concurrency::guarded_counter),
    section("select", "Select", concurrency::select_fibonacci),
    section("default-selection", "Default Selection", concurrency::default_select),
];

pub fn names() -> Vec<&'static str> {
    SECTIONS.iter().map(|s| s.name).collect()
}

pub fn find(name: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|s| s.name == name)
}

/// Resolves `requested` names to sections in tour order. An empty request
/// selects everything.
pub fn select(requested: &[String]) -> Result<Vec<&'static Section>> {
    if requested.is_empty() {
        return Ok(SECTIONS.iter().collect());
    }
    for name in requested {
        if find(name).is_none() {
            return Err(TourError::unknown_section(name.as_str(), &names()));
        }
    }
    Ok(SECTIONS
        .iter()
        .filter(|s| requested.iter().any(|r| r == s.name))
        .collect())
}

pub fn type_name_of<T: ?Sized>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

fn errors(t: &mut Tour<'_>) -> Result<()> {
    if let Err(e) = error::run() {
        writeln!(t.out, "{e}")?;
    }
    Ok(())
}

// =============================================================================
// Runner
// =============================================================================

enum Deferred {
    Banner(&'static str),
    Line(String),
}

pub struct Tour<'a> {
    pub out: &'a mut dyn Write,
    pub config: TourConfig,
    deferred: Vec<Deferred>,
}

impl<'a> Tour<'a> {
    pub fn new(out: &'a mut dyn Write, config: TourConfig) -> Self {
        Tour {
            out,
            config,
            deferred: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(out: &'a mut dyn Write) -> Self {
        Self::new(out, TourConfig::default())
    }

    /// Queues a line for [`Tour::finish`].
    pub fn defer(&mut self, line: impl Into<String>) {
        self.deferred.push(Deferred::Line(line.into()));
    }

    pub fn defer_banner(&mut self, title: &'static str) {
        self.deferred.push(Deferred::Banner(title));
    }

    #[cfg(test)]
    pub(crate) fn deferred_len(&self) -> usize {
        self.deferred.len()
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "\n{}", format!("==={title}===").bold().cyan())?;
        Ok(())
    }

    pub fn run_section(&mut self, section: &Section) -> Result<()> {
        debug!("running section {}", section.name);
        self.banner(section.title)?;
        (section.run)(self)
    }

    /// Runs `sections` in order, then flushes deferred output.
    pub fn run(&mut self, sections: &[&Section]) -> Result<()> {
        info!("touring {} sections", sections.len());
        for section in sections {
            self.run_section(section)?;
        }
        self.finish()
    }

    /// Writes deferred output newest first and clears it.
    pub fn finish(&mut self) -> Result<()> {
        while let Some(entry) = self.deferred.pop() {
            match entry {
                Deferred::Banner(title) => self.banner(title)?,
                Deferred::Line(line) => writeln!(self.out, "{line}")?,
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
