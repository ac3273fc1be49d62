//! Common regex patterns for rate sheet extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Validity dates: DD/MM/YYYY, no calendar check
    pub static ref DATE_DMY: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Markdown table dividers: only pipes, whitespace and dashes
    pub static ref SEPARATOR_LINE: Regex = Regex::new(
        r"^[\|\s\-]+$"
    ).unwrap();
}

/// Column markers that identify the rate table header.
pub const HEADER_MARKERS: [&str; 2] = ["Origin", "Destination"];

/// Whether a pipe-delimited line is the rate table header.
pub fn is_header_line(line: &str) -> bool {
    line.contains('|') && HEADER_MARKERS.iter().all(|marker| line.contains(marker))
}
