pub mod entry_parser;

pub use entry_parser::{ParsedEntry, parse_entry, read_section_titles, read_tag_titles};
