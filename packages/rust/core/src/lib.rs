//! Dictionary build pipeline for Ordliste.
//!
//! Loads the English/Norwegian word list, renders the two directional
//! tables, assembles and writes the Markdown document, then hands the file
//! to a [`Formatter`](ordliste_markdown::Formatter) (see [`pipeline::build_dictionary`]).

pub mod document;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod writer;
