//! Upload validation. Runs before anything touches the network.

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;

/// Extensions the extractor accepts, lowercase, without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

const FALLBACK_MIME: &str = "application/pdf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX, or TXT file.")]
    UnsupportedFileType(String),

    #[error("The uploaded file is empty.")]
    Empty,

    #[error("The uploaded file is {size} bytes; the limit is {limit} bytes.")]
    TooLarge { size: usize, limit: usize },

    #[error("No file was attached to the upload.")]
    MissingFile,
}

/// A validated document ready for extraction.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    /// Validates the extension, size and payload of an upload.
    ///
    /// `content_type` is the type declared by the client; it is only trusted when
    /// it says something more specific than `application/octet-stream`.
    pub fn new(
        file_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
        max_bytes: usize,
    ) -> Result<Self, UploadError> {
        let extension = check_extension(file_name)?;
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let declared = content_type
            .map(|c| c.split(';').next().unwrap_or("").trim())
            .filter(|c| !c.is_empty() && *c != "application/octet-stream");
        let mime_type = declared
            .map(str::to_string)
            .unwrap_or_else(|| mime_for_extension(&extension).to_string());

        Ok(Self {
            file_name: file_name.to_string(),
            mime_type,
            bytes,
        })
    }
}

/// Returns the lowercase extension if the name ends in a supported one.
/// A bare `.pdf` counts, matching a plain suffix test.
pub fn check_extension(file_name: &str) -> Result<String, UploadError> {
    let lower = file_name.to_ascii_lowercase();
    if let Some(found) = SUPPORTED_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(&format!(".{ext}")))
    {
        return Ok(found.to_string());
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if extension.is_empty() {
        Err(UploadError::UnsupportedFileType(file_name.to_string()))
    } else {
        Err(UploadError::UnsupportedFileType(format!(".{extension}")))
    }
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    #[test]
    fn test_accepts_supported_extensions_case_insensitively() {
        for name in ["cv.pdf", "CV.PDF", "resume.Docx", "notes.txt"] {
            let doc = UploadedDocument::new(name, None, Bytes::from_static(b"x"), LIMIT);
            assert!(doc.is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejects_unsupported_extensions() {
        let err = UploadedDocument::new("photo.png", None, Bytes::from_static(b"x"), LIMIT)
            .unwrap_err();
        assert_eq!(err, UploadError::UnsupportedFileType(".png".to_string()));

        let err =
            UploadedDocument::new("README", None, Bytes::from_static(b"x"), LIMIT).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_double_extension_uses_last_segment() {
        assert!(check_extension("resume.pdf.exe").is_err());
        assert_eq!(check_extension("resume.final.pdf").unwrap(), "pdf");
    }

    #[test]
    fn test_bare_extension_name_is_accepted() {
        assert_eq!(check_extension(".pdf").unwrap(), "pdf");
        assert_eq!(check_extension(".TXT").unwrap(), "txt");
        assert!(check_extension("pdf").is_err(), "no dot, no extension");
    }

    #[test]
    fn test_rejects_empty_and_oversized_payloads() {
        assert_eq!(
            UploadedDocument::new("cv.pdf", None, Bytes::new(), LIMIT).unwrap_err(),
            UploadError::Empty
        );
        let big = Bytes::from(vec![0u8; LIMIT + 1]);
        assert!(matches!(
            UploadedDocument::new("cv.pdf", None, big, LIMIT).unwrap_err(),
            UploadError::TooLarge { .. }
        ));
    }

    #[test]
    fn test_mime_prefers_declared_type_over_extension() {
        let doc = UploadedDocument::new(
            "cv.txt",
            Some("text/plain; charset=utf-8"),
            Bytes::from_static(b"hello"),
            LIMIT,
        )
        .unwrap();
        assert_eq!(doc.mime_type, "text/plain");

        let doc = UploadedDocument::new(
            "cv.docx",
            Some("application/octet-stream"),
            Bytes::from_static(b"PK"),
            LIMIT,
        )
        .unwrap();
        assert!(doc.mime_type.contains("wordprocessingml"));
    }
}
