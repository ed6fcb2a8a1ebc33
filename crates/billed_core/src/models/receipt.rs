use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared media types a receipt may carry. Checked before any upload.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Notice shown when the employee picks anything else.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Format non supporté, veuillez utiliser des jpg, jpeg ou des png";

pub fn is_supported_media_type(media_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&media_type)
}

/// Display name from a path-like input value ("C:\fakepath\receipt.png").
/// Split on both separators, keep the last segment.
pub fn derive_file_name(path_value: &str) -> String {
    path_value
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path_value)
        .to_string()
}

// ---------------------------------------------------------------------------
// The Handoff: receipt upload state
// One writer (the upload continuation), one reader (the submit handler).
// The tagged states make "nothing uploaded yet" representable.
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReceiptUpload {
    #[default]
    NoUpload,
    Uploading,
    Uploaded {
        file_url: String,
        file_name: String,
        key: Uuid,
    },
    Failed {
        message: String,
    },
}

impl ReceiptUpload {
    pub fn file_url(&self) -> Option<&str> {
        match self {
            ReceiptUpload::Uploaded { file_url, .. } => Some(file_url),
            _ => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            ReceiptUpload::Uploaded { file_name, .. } => Some(file_name),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<Uuid> {
        match self {
            ReceiptUpload::Uploaded { key, .. } => Some(*key),
            _ => None,
        }
    }
}

/// What the file picker (or its CLI/HTTP equivalent) hands to the workflow.
#[derive(Debug, Clone)]
pub struct FileSelection {
    /// Path-like value of the input ("C:\fakepath\receipt.png").
    pub path_value: String,
    /// Media type as declared by the client.
    pub media_type: String,
    pub content: Vec<u8>,
}

/// Multipart payload forwarded to the store's create operation.
#[derive(Debug, Clone)]
pub struct ReceiptPayload {
    pub email: String,
    pub file_name: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

/// What the store returns once the receipt is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedReceipt {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    pub key: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_only_images() {
        assert!(is_supported_media_type("image/png"));
        assert!(is_supported_media_type("image/jpeg"));
        assert!(is_supported_media_type("image/jpg"));

        assert!(!is_supported_media_type("document/txt"));
        assert!(!is_supported_media_type("application/pdf"));
        assert!(!is_supported_media_type("image/gif"));
    }

    #[test]
    fn file_name_is_the_last_path_segment() {
        assert_eq!(derive_file_name(r"C:\fakepath\receipt.png"), "receipt.png");
        assert_eq!(derive_file_name("/tmp/uploads/note.jpg"), "note.jpg");
        assert_eq!(derive_file_name("image.jpeg"), "image.jpeg");
    }

    #[test]
    fn pending_states_expose_no_file_fields() {
        for state in [
            ReceiptUpload::NoUpload,
            ReceiptUpload::Uploading,
            ReceiptUpload::Failed { message: "Erreur 500".into() },
        ] {
            assert!(state.file_url().is_none());
            assert!(state.file_name().is_none());
            assert!(state.key().is_none());
        }
    }
}
