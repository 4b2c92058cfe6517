use crate::models::Document;
use anyhow::Result;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Please upload a PDF file.")]
    InvalidFileType { media_type: String },

    #[error("Failed to extract text from the PDF.")]
    Failed { detail: String },
}

/// Turns PDF bytes into one string per page.
pub trait PageExtractor: Send + Sync {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

pub struct PdfExtractPages;

impl PageExtractor for PdfExtractPages {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| anyhow::anyhow!("PDF parser panicked"))?
        .map_err(|e| anyhow::anyhow!("PDF extraction failed: {}", e))?;

        Ok(pages)
    }
}

#[derive(Clone)]
pub struct DocumentProcessor {
    extractor: Arc<dyn PageExtractor>,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self::with_extractor(Arc::new(PdfExtractPages))
    }

    pub fn with_extractor(extractor: Arc<dyn PageExtractor>) -> Self {
        Self { extractor }
    }

    /// Checks the declared media type, then extracts every page.
    ///
    /// Nothing is parsed when the media type is wrong, and no partial
    /// document is ever returned.
    pub fn process_upload(
        &self,
        filename: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> std::result::Result<Document, ExtractionError> {
        if !is_pdf_media_type(media_type) {
            log::warn!("Rejected upload {} with media type {:?}", filename, media_type);
            return Err(ExtractionError::InvalidFileType {
                media_type: media_type.to_string(),
            });
        }

        log::info!("Processing PDF: {} ({} bytes)", filename, bytes.len());

        let pages = self.extractor.pages(bytes).map_err(|e| {
            log::error!("Error extracting text from {}: {:#}", filename, e);
            ExtractionError::Failed {
                detail: e.to_string(),
            }
        })?;

        let text = join_pages(&pages);
        log::info!("Extracted {} pages from {}", pages.len(), filename);

        Ok(Document {
            filename: filename.to_string(),
            text,
            page_count: pages.len(),
        })
    }
}

pub fn is_pdf_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
}

/// Every page is followed by a newline, including the last one.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref().trim());
        text.push('\n');
    }
    text
}
