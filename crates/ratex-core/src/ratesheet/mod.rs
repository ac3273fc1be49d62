//! Rate sheet extraction: validity metadata, rate table rows and the flat
//! records built from them.

mod assembler;
mod metadata;
mod parser;
pub mod rules;
mod table;

pub use assembler::{assemble, RecordAssembler};
pub use metadata::{extract_metadata, MetadataExtractor};
pub use parser::{RateSheet, RateSheetParser};
pub use rules::format_for_identifier;
pub use table::{extract_table_data, SkipReason, SkippedRow, TableExtraction, TableExtractor};
