//! Locally produced artifacts: CSV exports and the printable QR sheet.

pub mod csv;
pub mod download;
pub mod qr_pdf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(String),
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}
