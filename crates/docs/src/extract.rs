//! Plain-text extraction from local files.
//!
//! Word documents contribute their body paragraphs joined by newlines, PDFs
//! their per-page text each followed by a newline; everything else is read
//! as UTF-8.

use docgen_core::{AppError, AppResult};
use std::path::Path;

/// Read `path` as plain text, dispatching on its extension.
pub fn read_local_file(path: &Path) -> AppResult<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let text = match ext.as_deref() {
        Some("docx") => read_docx(path)?,
        Some("pdf") => read_pdf(path)?,
        Some("doc") => {
            return Err(AppError::Input(format!(
                "Legacy .doc files are not supported, save as .docx: {}",
                path.display()
            )))
        }
        _ => read_text(path)?,
    };

    tracing::info!(
        "Read {} characters from {}",
        text.chars().count(),
        path.display()
    );

    Ok(text)
}

fn read_text(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::Input(format!("{} is not valid UTF-8 text", path.display())))
}

fn read_docx(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;
    let doc = docx_rs::read_docx(&bytes)
        .map_err(|e| AppError::Input(format!("Failed to parse Word document: {}", e)))?;

    let paragraphs: Vec<String> = doc
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(para) => Some(paragraph_text(&para.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[docx_rs::ParagraphChild]) -> String {
    let mut out = String::new();
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let docx_rs::RunChild::Text(text) = run_child {
                        out.push_str(&text.text);
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                out.push_str(&paragraph_text(&link.children));
            }
            _ => {}
        }
    }
    out
}

fn read_pdf(path: &Path) -> AppResult<String> {
    let bytes = std::fs::read(path)?;

    // pdf-extract can panic on malformed fonts
    let pages = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
        .map_err(|_| {
            AppError::Input(format!(
                "PDF extraction panicked, the file likely has malformed fonts: {}",
                path.display()
            ))
        })?
        .map_err(|e| AppError::Input(format!("Failed to read PDF: {}", e)))?;

    let mut content = String::new();
    for page in pages {
        content.push_str(&page);
        content.push('\n');
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("style.md");
        std::fs::write(&path, "Short sentences.\nNo adverbs. ✓\n").unwrap();

        assert_eq!(
            read_local_file(&path).unwrap(),
            "Short sentences.\nNo adverbs. ✓\n"
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bin.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(read_local_file(&path), Err(AppError::Input(_))));
    }

    #[test]
    fn test_legacy_doc_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.DOC");
        std::fs::write(&path, b"whatever").unwrap();

        assert!(matches!(read_local_file(&path), Err(AppError::Input(_))));
    }

    #[test]
    fn test_read_docx_paragraphs() {
        use docx_rs::{Docx, Paragraph, Run};

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("brief.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph.")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Second paragraph"))
                    .add_run(Run::new().add_text(", continued.")),
            )
            .build()
            .pack(file)
            .unwrap();

        assert_eq!(
            read_local_file(&path).unwrap(),
            "First paragraph.\nSecond paragraph, continued."
        );
    }

    #[test]
    fn test_corrupt_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        assert!(read_local_file(&path).is_err());
    }
}
