//! PDF text extraction

use std::path::Path;

use docq_core::{Document, Error, Result};

/// Extract the raw text of a PDF file
pub fn extract_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| Error::DocumentRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Extract a PDF into a [`Document`] whose id is the file stem.
///
/// The file stem keeps chunk ids stable across runs from different working
/// directories, which the overwrite semantics of the store rely on.
pub fn document_from_pdf(path: &Path) -> Result<Document> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::DocumentRead {
            path: path.display().to_string(),
            reason: "path has no usable file name".to_string(),
        })?;

    let content = extract_text(path)?;
    Ok(Document::new(id, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_is_a_document_read_error() {
        let path = PathBuf::from("files/definitely_not_here.pdf");
        match extract_text(&path) {
            Err(Error::DocumentRead { path, .. }) => {
                assert!(path.contains("definitely_not_here.pdf"));
            }
            other => panic!("expected DocumentRead error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_document_id_is_file_stem() {
        // id derivation does not touch the filesystem until extraction
        let path = PathBuf::from("files/encomiendas.pdf");
        let id = path.file_stem().and_then(|s| s.to_str()).unwrap();
        assert_eq!(id, "encomiendas");
    }
}
