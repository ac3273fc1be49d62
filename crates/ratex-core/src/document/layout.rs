//! Rebuild pipe-delimited rows from positioned PDF text.
//!
//! Table borders in a PDF are vector paths, so plain text extraction loses
//! the column structure. Here every text-showing operator is placed at its
//! text-matrix origin; runs sharing a baseline form a row and each run is a
//! cell. Only simple one-byte fonts are decoded; advances are not tracked, so
//! consecutive runs without a positioning operator land in the same cell.

use lopdf::content::Operation;
use lopdf::{Document, Object};
use tracing::trace;

use super::Result;
use crate::error::DocumentError;

/// Vertical distance (text space units) under which two runs share a row.
const ROW_TOLERANCE: f64 = 2.0;

/// TJ adjustment (thousandths of an em) treated as a word gap.
const TJ_SPACE: f64 = -250.0;

#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    x: f64,
    y: f64,
    text: String,
}

/// Text state for one content stream, translation only.
#[derive(Debug, Clone, Copy)]
struct TextState {
    line: [f64; 6],
    leading: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            line: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            leading: 0.0,
        }
    }
}

impl TextState {
    fn translate(&mut self, tx: f64, ty: f64) {
        let [a, b, c, d, e, f] = self.line;
        self.line[4] = tx * a + ty * c + e;
        self.line[5] = tx * b + ty * d + f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn origin(&self) -> (f64, f64) {
        (self.line[4], self.line[5])
    }
}

/// Lay out every page of `doc` as text lines, table rows framed by pipes.
pub(crate) fn layout_text(doc: &Document) -> Result<String> {
    let mut pages = Vec::new();

    for (number, page_id) in doc.get_pages() {
        let content = doc
            .get_and_decode_page_content(page_id)
            .map_err(|e| DocumentError::TextExtraction(format!("page {}: {}", number, e)))?;
        let runs = collect_runs(&content.operations);
        trace!("Page {}: {} positioned text run(s)", number, runs.len());
        pages.push(rows_to_text(runs));
    }

    Ok(pages.join("\n\n"))
}

fn collect_runs(operations: &[Operation]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut state = TextState::default();

    for op in operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => state = TextState { leading: state.leading, ..TextState::default() },
            "Tm" => {
                if let Some(m) = numbers::<6>(operands) {
                    state.line = m;
                }
            }
            "Td" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    state.translate(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = numbers::<2>(operands) {
                    state.leading = -ty;
                    state.translate(tx, ty);
                }
            }
            "TL" => {
                if let Some([leading]) = numbers::<1>(operands) {
                    state.leading = leading;
                }
            }
            "T*" => state.next_line(),
            "Tj" => push_run(&mut runs, &state, operands.first()),
            "'" => {
                state.next_line();
                push_run(&mut runs, &state, operands.first());
            }
            "\"" => {
                state.next_line();
                push_run(&mut runs, &state, operands.get(2));
            }
            "TJ" => push_run(&mut runs, &state, operands.first()),
            _ => {}
        }
    }

    runs
}

fn push_run(runs: &mut Vec<TextRun>, state: &TextState, operand: Option<&Object>) {
    let Some(text) = operand.and_then(shown_text) else {
        return;
    };
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = state.origin();
    runs.push(TextRun { x, y, text });
}

/// Text shown by a Tj string or a TJ array.
fn shown_text(operand: &Object) -> Option<String> {
    match operand {
        Object::String(bytes, _) => Some(decode_bytes(bytes)),
        Object::Array(items) => {
            let mut text = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_bytes(bytes)),
                    other => {
                        if number(other).is_some_and(|n| n <= TJ_SPACE) {
                            text.push(' ');
                        }
                    }
                }
            }
            Some(text)
        }
        _ => None,
    }
}

/// UTF-16BE when marked with a BOM, otherwise one byte per character.
fn decode_bytes(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn numbers<const N: usize>(operands: &[Object]) -> Option<[f64; N]> {
    if operands.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, object) in out.iter_mut().zip(operands) {
        *slot = number(object)?;
    }
    Some(out)
}

/// Group runs into baselines (top to bottom), then cells (left to right).
fn rows_to_text(mut runs: Vec<TextRun>) -> String {
    runs.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<Vec<TextRun>> = Vec::new();
    for run in runs {
        match rows.last_mut() {
            Some(row) if (row[0].y - run.y).abs() <= ROW_TOLERANCE => row.push(run),
            _ => rows.push(vec![run]),
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            format_row(&row)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_row(row: &[TextRun]) -> String {
    if let [single] = row {
        return single.text.trim().to_string();
    }

    let cells: Vec<&str> = row
        .iter()
        .map(|run| run.text.trim_matches(|c: char| c == '|' || c.is_whitespace()))
        .filter(|cell| !cell.is_empty())
        .collect();

    match cells.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        _ => format!("| {} |", cells.join(" | ")),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(x: f64, y: f64, text: &str) -> TextRun {
        TextRun { x, y, text: text.to_string() }
    }

    #[test]
    fn test_rows_grouped_by_baseline() {
        let runs = vec![
            run(150.0, 740.0, "IST"),
            run(50.0, 760.0, "Origin"),
            run(50.0, 740.4, "FRA"),
            run(150.0, 760.0, "Destination"),
            run(50.0, 800.0, "Valid 01/02/2024 - 28/02/2024"),
        ];

        assert_eq!(
            rows_to_text(runs),
            "Valid 01/02/2024 - 28/02/2024\n| Origin | Destination |\n| FRA | IST |"
        );
    }

    #[test]
    fn test_drawn_pipes_are_not_cells() {
        let row = [run(10.0, 0.0, "|"), run(20.0, 0.0, "FRA"), run(40.0, 0.0, "| IST |")];
        assert_eq!(format_row(&row), "| FRA | IST |");
    }

    #[test]
    fn test_text_state_moves() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 100.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("a")]),
            Operation::new("TD", vec![0.into(), (-12).into()]),
            Operation::new("Tj", vec![Object::string_literal("b")]),
            Operation::new("T*", vec![]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("c"),
                    Object::Integer(-300),
                    Object::string_literal("d"),
                ])],
            ),
            Operation::new("ET", vec![]),
        ];

        assert_eq!(
            collect_runs(&ops),
            vec![run(100.0, 700.0, "a"), run(100.0, 688.0, "b"), run(100.0, 676.0, "c d")]
        );
    }

    #[test]
    fn test_decode_utf16() {
        assert_eq!(decode_bytes(&[0xFE, 0xFF, 0x00, 0x46, 0x00, 0x52]), "FR");
        assert_eq!(decode_bytes(b"10,50"), "10,50");
    }

    #[test]
    fn test_layout_of_generated_pdf() {
        let doc = Document::load_mem(&fixtures::rate_sheet_pdf()).unwrap();
        let text = layout_text(&doc).unwrap();

        assert_eq!(
            text,
            "Valid 01/02/2024 - 28/02/2024\n\
             | Origin | Destination | Min | <45 | >45 |\n\
             | FRA | IST | 10,50 | 5,20 | 4,10 |\n\
             | MUC | ESB | 12,00 | 6,10 | 4,90 |"
        );
    }
}
