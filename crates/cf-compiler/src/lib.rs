//! Cosmetic Filter List Compiler
//!
//! This crate reads ABP/uBO filter lists into cosmetic rules and renders the
//! compiled tables into the userscript.

pub mod lists;
pub mod parser;
pub mod render;
pub mod topdomains;

pub use lists::{read_list_file, ListSource};
pub use parser::{parse_filter_list, parse_line, ParseError, ParsedList};
pub use render::{render, Error, RenderOptions, DEFAULT_TEMPLATE};
pub use topdomains::parse_top_domains;
