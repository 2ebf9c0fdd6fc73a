//! DOCX extraction.
//!
//! Word stores text as runs nested inside paragraphs, hyperlinks and table
//! cells, so extraction is a recursive walk over `docx-rs`'s document tree.
//! Each paragraph becomes one output line; table cells within a row are
//! joined with `" | "` so tabular deck content stays readable as text.
//! Styling, images and numbering are ignored.

use crate::document::{ExtractedText, RawDocument};
use crate::error::AnalysisError;
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

pub fn extract(doc: &RawDocument) -> Result<ExtractedText, AnalysisError> {
    let docx = docx_rs::read_docx(&doc.bytes).map_err(|e| AnalysisError::ExtractionFailed {
        kind: doc.kind,
        detail: format!("{e}"),
    })?;

    let mut lines: Vec<String> = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => lines.push(paragraph_text(para)),
            DocumentChild::Table(table) => table_lines(table, &mut lines),
            _ => {}
        }
    }

    Ok(ExtractedText::new(lines.join("\n")))
}

/// Concatenate the text of every run in a paragraph, including runs nested
/// inside hyperlinks and inserted revisions.
fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        paragraph_child_text(child, &mut out);
    }
    out
}

fn paragraph_child_text(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_) => out.push('\t'),
                    _ => {}
                }
            }
        }
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                paragraph_child_text(inner, out);
            }
        }
        ParagraphChild::Insert(ins) => {
            for inner in &ins.children {
                if let docx_rs::InsertChild::Run(run) = inner {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            out.push_str(&t.text);
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

/// Flatten a table into one line per row, cells joined with `" | "`.
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        let mut cells: Vec<String> = Vec::new();
        for TableRowChild::TableCell(cell) in &row.cells {
            let mut cell_text = String::new();
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => {
                        if !cell_text.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&paragraph_text(para));
                    }
                    TableCellContent::Table(nested) => {
                        let mut nested_lines = Vec::new();
                        table_lines(nested, &mut nested_lines);
                        if !cell_text.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&nested_lines.join(" "));
                    }
                    _ => {}
                }
            }
            cells.push(cell_text);
        }
        lines.push(cells.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};

    fn docx_bytes(docx: Docx) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn extracts_paragraphs_as_lines() {
        let bytes = docx_bytes(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("PROBLEM")))
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("We solve X."))),
        );
        let doc = RawDocument::from_bytes(bytes, "deck.docx").unwrap();
        let text = extract(&doc).unwrap();
        assert!(text.as_str().contains("PROBLEM\nWe solve X."));
    }

    #[test]
    fn joins_runs_within_a_paragraph() {
        let bytes = docx_bytes(Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("We "))
                .add_run(Run::new().add_text("solve X.")),
        ));
        let doc = RawDocument::from_bytes(bytes, "deck.docx").unwrap();
        let text = extract(&doc).unwrap();
        assert!(text.as_str().contains("We solve X."));
    }

    #[test]
    fn joins_table_cells_with_pipe() {
        use docx_rs::{Table, TableCell, TableRow};

        let bytes = docx_bytes(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("TRACTION")))
                .add_table(Table::new(vec![TableRow::new(vec![
                    TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("MRR"))),
                    TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("$18k"))),
                ])])),
        );
        let doc = RawDocument::from_bytes(bytes, "deck.docx").unwrap();
        let text = extract(&doc).unwrap();
        assert!(
            text.as_str().contains("MRR | $18k"),
            "table row should flatten to pipe-joined cells, got: {}",
            text.as_str()
        );
    }

    #[test]
    fn extracts_text_inside_hyperlinks() {
        use docx_rs::{Hyperlink, HyperlinkType};

        let bytes = docx_bytes(Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Dashboard: "))
                .add_hyperlink(
                    Hyperlink::new("metrics", HyperlinkType::Anchor)
                        .add_run(Run::new().add_text("live metrics")),
                ),
        ));
        let doc = RawDocument::from_bytes(bytes, "deck.docx").unwrap();
        let text = extract(&doc).unwrap();
        assert!(text.as_str().contains("Dashboard: live metrics"));
    }

    #[test]
    fn rejects_non_docx_bytes() {
        let doc = RawDocument::from_bytes(b"not a zip".to_vec(), "deck.docx").unwrap();
        let err = extract(&doc).unwrap_err();
        assert!(matches!(err, AnalysisError::ExtractionFailed { .. }));
    }
}
