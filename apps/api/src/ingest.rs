//! File-to-text ingestion for uploaded CVs. The pipeline itself only ever
//! sees plain UTF-8 text; this module is the boundary that produces it.

use thiserror::Error;
use tracing::debug;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file format '{0}': supported formats are PDF and plain text")]
    UnsupportedFormat(String),

    #[error("file is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("could not extract text from PDF: {0}")]
    PdfExtraction(String),

    #[error("file contains no extractable text")]
    EmptyDocument,
}

enum FileFormat {
    Pdf,
    Text,
}

/// Converts an uploaded document into a single plain-text string. The format
/// is chosen by MIME type, falling back to the file extension when the
/// browser sends a generic type.
pub fn extract_text(
    content_type: Option<&str>,
    filename: Option<&str>,
    bytes: &[u8],
) -> Result<String, IngestError> {
    let format = detect_format(content_type, filename).ok_or_else(|| {
        IngestError::UnsupportedFormat(
            content_type
                .or(filename)
                .unwrap_or("unknown")
                .to_string(),
        )
    })?;

    let text = match format {
        FileFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::PdfExtraction(e.to_string()))?,
        FileFormat::Text => {
            String::from_utf8(bytes.to_vec()).map_err(|_| IngestError::InvalidEncoding)?
        }
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyDocument);
    }

    debug!("Extracted {} characters from upload", text.len());
    Ok(text)
}

fn detect_format(content_type: Option<&str>, filename: Option<&str>) -> Option<FileFormat> {
    match content_type {
        Some(PDF_MIME) => return Some(FileFormat::Pdf),
        Some(t) if t.starts_with("text/plain") => return Some(FileFormat::Text),
        _ => {}
    }

    let (_, extension) = filename?.rsplit_once('.')?;
    match extension.to_lowercase().as_str() {
        "pdf" => Some(FileFormat::Pdf),
        "txt" => Some(FileFormat::Text),
        _ => None,
    }
}
