use crate::error::IngestError;

const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".tar", ".tar.gz", ".tgz"];
const MARKUP_EXTENSIONS: &[&str] = &[".html", ".htm"];

/// One upload, exactly one variant per ingestion call.
#[derive(Clone, Debug)]
pub enum UploadPayload {
    /// Markup text pasted directly; becomes the artifact's `index.html`.
    RawMarkup(String),
    /// A single uploaded markup file; its bytes become `index.html`.
    SingleMarkupFile(Vec<u8>),
    /// A compressed bundle, extracted after sanitization.
    Archive(Vec<u8>),
}

impl UploadPayload {
    /// Classify an uploaded file by name. Anything that is neither a
    /// recognized bundle nor a markup document is refused before any
    /// filesystem work happens.
    pub fn from_upload(file_name: &str, bytes: Vec<u8>) -> Result<Self, IngestError> {
        let lower = file_name.to_ascii_lowercase();

        if ARCHIVE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Ok(UploadPayload::Archive(bytes))
        } else if MARKUP_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Ok(UploadPayload::SingleMarkupFile(bytes))
        } else {
            Err(IngestError::UnsupportedPayload {
                reason: format!("unrecognized upload name '{file_name}'"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_bundles_and_markup() {
        assert!(matches!(
            UploadPayload::from_upload("site.zip", vec![]).unwrap(),
            UploadPayload::Archive(_)
        ));
        assert!(matches!(
            UploadPayload::from_upload("dist.TAR.GZ", vec![]).unwrap(),
            UploadPayload::Archive(_)
        ));
        assert!(matches!(
            UploadPayload::from_upload("Game.HTML", vec![]).unwrap(),
            UploadPayload::SingleMarkupFile(_)
        ));
    }

    #[test]
    fn refuses_everything_else() {
        for name in ["notes.txt", "archive.rar", "app.js", "html"] {
            assert!(matches!(
                UploadPayload::from_upload(name, vec![]),
                Err(IngestError::UnsupportedPayload { .. })
            ));
        }
    }
}
