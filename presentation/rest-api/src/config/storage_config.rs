use std::env;

/// Configuration for the local document store.
pub struct StorageConfig {
    pub base_dir: String,
}

impl StorageConfig {
    /// Environment variables:
    /// - STORAGE_DIR: directory for uploaded documents
    ///   (default: "static/receipt_documents")
    pub fn from_env() -> Self {
        let base_dir =
            env::var("STORAGE_DIR").unwrap_or_else(|_| "static/receipt_documents".to_string());
        Self { base_dir }
    }
}
