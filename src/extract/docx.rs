// DOCX text extraction over the `docx-rs` reader.

use docx_rs::{
    DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild,
};

use super::ExtractError;

/// Extracts the text of a Word document held fully in memory.
///
/// Paragraphs are collected in document order and joined with a newline
/// boundary. Table rows are flattened into one line per row with cells
/// separated by ` | `, so tabular content survives as readable text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Extraction(e.to_string()))?;

    let mut blocks = Vec::new();
    for child in &doc.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => blocks.push(paragraph_text(paragraph)),
            DocumentChild::Table(table) => collect_table_rows(table, &mut blocks),
            _ => {}
        }
    }

    Ok(blocks.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, &mut text),
            ParagraphChild::Hyperlink(link) => {
                for nested in &link.children {
                    if let ParagraphChild::Run(run) = nested {
                        push_run_text(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        if let RunChild::Text(text) = child {
            out.push_str(&text.text);
        }
    }
}

fn collect_table_rows(table: &docx_rs::Table, blocks: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(table_row) = row;
        let mut cells = Vec::new();
        for cell in &table_row.cells {
            let TableRowChild::TableCell(table_cell) = cell;
            let mut cell_text = String::new();
            for content in &table_cell.children {
                if let TableCellContent::Paragraph(paragraph) = content {
                    if !cell_text.is_empty() {
                        cell_text.push(' ');
                    }
                    cell_text.push_str(&paragraph_text(paragraph));
                }
            }
            cells.push(cell_text);
        }
        blocks.push(cells.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    use super::*;

    fn docx_bytes(docx: Docx) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).expect("pack docx");
        cursor.into_inner()
    }

    fn text_paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn joins_paragraphs_in_document_order() {
        let docx = Docx::new()
            .add_paragraph(text_paragraph("First paragraph"))
            .add_paragraph(text_paragraph("Second paragraph"))
            .add_paragraph(text_paragraph("Third paragraph"));

        let text = extract_text(&docx_bytes(docx)).unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph\nThird paragraph");
    }

    #[test]
    fn document_without_text_yields_empty_string() {
        let docx = Docx::new().add_paragraph(Paragraph::new());
        let text = extract_text(&docx_bytes(docx)).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn flattens_table_cells_in_row_order() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(text_paragraph("Name")),
            TableCell::new().add_paragraph(text_paragraph("Score")),
        ])]);
        let docx = Docx::new()
            .add_paragraph(text_paragraph("Results"))
            .add_table(table);

        let text = extract_text(&docx_bytes(docx)).unwrap();
        assert!(text.starts_with("Results\n"));
        assert!(text.contains("Name | Score"));
    }

    #[test]
    fn corrupt_bytes_are_an_extraction_error() {
        assert!(matches!(
            extract_text(b"this is not a zip archive"),
            Err(ExtractError::Extraction(_))
        ));
    }
}
