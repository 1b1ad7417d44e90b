use serde::{Deserialize, Serialize};

use super::errors::ReceiptError;

/// Media types accepted for uploaded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Jpeg,
    Png,
    Pdf,
}

impl MediaType {
    /// File extension used when the document is written to the store.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "jpg",
            MediaType::Png => "png",
            MediaType::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Jpeg => write!(f, "image/jpeg"),
            MediaType::Png => write!(f, "image/png"),
            MediaType::Pdf => write!(f, "application/pdf"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            "image/png" => Ok(MediaType::Png),
            "application/pdf" => Ok(MediaType::Pdf),
            _ => Err(format!("Unsupported media type: {}", s)),
        }
    }
}

/// Document classification inferred by the model.
///
/// A Factura is a formal tax invoice (RFC, CFDI, Serie/Folio indicators);
/// a Ticket is a plain point-of-sale receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Ticket,
    Factura,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Ticket => write!(f, "Ticket"),
            DocumentType::Factura => write!(f, "Factura"),
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ticket" => Ok(DocumentType::Ticket),
            "Factura" => Ok(DocumentType::Factura),
            _ => Err(format!("Invalid document type: {}", s)),
        }
    }
}

/// A document submitted for extraction: raw bytes plus their media type.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl DocumentUpload {
    /// Empty uploads are rejected here, before any provider call is made.
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Result<Self, ReceiptError> {
        if bytes.is_empty() {
            return Err(ReceiptError::EmptyDocument);
        }
        Ok(Self { bytes, media_type })
    }
}
