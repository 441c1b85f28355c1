use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use log::warn;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("invalid base64 file payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("could not materialize preview file: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode a base64 file payload into bytes.
///
/// Some backends wrap long base64 text with CR/LF, which the strict decoder
/// rejects, so line breaks are stripped first.
pub fn decode_base64_payload(text: &str) -> Result<Vec<u8>, PreviewError> {
    let cleaned: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    Ok(BASE64_STANDARD.decode(cleaned.as_bytes())?)
}

/// A decoded PDF held on disk for the duration of its preview modal.
///
/// The temp file plays the role of a viewer URL: it exists from open to
/// close and is removed exactly once when the preview closes. Dropping the
/// document removes the file too, so a preview left open at quit does not
/// leak.
#[derive(Debug)]
pub struct PreviewDoc {
    summary_name: String,
    file: Option<NamedTempFile>,
    size: usize,
    pdf_version: Option<String>,
}

impl PreviewDoc {
    /// Write the decoded bytes to a fresh temp file.
    pub fn create(summary_name: &str, bytes: &[u8]) -> Result<Self, PreviewError> {
        let mut file = tempfile::Builder::new()
            .prefix("summary-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self {
            summary_name: summary_name.to_string(),
            file: Some(file),
            size: bytes.len(),
            pdf_version: pdf_version(bytes),
        })
    }

    pub fn summary_name(&self) -> &str {
        &self.summary_name
    }

    /// Decoded size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Version from the `%PDF-x.y` header, `None` when the bytes do not
    /// look like a PDF.
    pub fn pdf_version(&self) -> Option<&str> {
        self.pdf_version.as_deref()
    }

    /// Path handed to external viewers. `None` once closed.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path())
    }

    /// Remove the temp file. Calling again is a no-op: the file is removed
    /// at most once.
    pub fn close(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                warn!("could not remove preview file: {e}");
            }
        }
    }
}

fn pdf_version(bytes: &[u8]) -> Option<String> {
    let head = bytes.get(..8)?;
    let head = std::str::from_utf8(head).ok()?;
    head.strip_prefix("%PDF-").map(|v| v.trim().to_string())
}

/// Human-readable byte count for the preview modal.
pub fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f >= MIB {
        format!("{:.1} MiB", bytes_f / MIB)
    } else if bytes_f >= KIB {
        format!("{:.1} KiB", bytes_f / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_decode_round_trips_encoded_bytes() {
        let original: Vec<u8> = (0u8..=255).collect();
        let encoded = BASE64_STANDARD.encode(&original);
        assert_eq!(decode_base64_payload(&encoded).unwrap(), original);
    }

    #[test]
    fn test_decode_strips_line_breaks() {
        // "%PDF-1.7" split across wrapped lines
        let wrapped = "JVBE\r\nRi0x\nLjc=";
        assert_eq!(decode_base64_payload(wrapped).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_base64_payload("not base64!!!").is_err());
    }

    #[test]
    fn test_preview_doc_lifecycle() {
        let mut doc = PreviewDoc::create("Anatomy I", b"%PDF-1.7 fake body").unwrap();
        let path: PathBuf = doc.path().unwrap().to_path_buf();
        assert!(path.exists());
        assert!(path.extension().is_some_and(|e| e == "pdf"));
        assert_eq!(doc.size(), 18);
        assert_eq!(doc.pdf_version(), Some("1.7"));

        doc.close();
        assert!(doc.path().is_none());
        assert!(!path.exists());

        // closing twice must stay a no-op
        doc.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_open_close_cycles_leave_no_files_behind() {
        let mut paths = Vec::new();
        for i in 0..5 {
            let mut doc = PreviewDoc::create(&format!("doc {i}"), b"%PDF-1.4").unwrap();
            paths.push(doc.path().unwrap().to_path_buf());
            doc.close();
        }
        for path in paths {
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_drop_removes_file() {
        let path = {
            let doc = PreviewDoc::create("left open", b"%PDF-1.4").unwrap();
            doc.path().unwrap().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_pdf_version_absent_for_non_pdf_bytes() {
        let doc = PreviewDoc::create("garbage", b"hello world").unwrap();
        assert_eq!(doc.pdf_version(), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
