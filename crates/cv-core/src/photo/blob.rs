use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn image_jpeg() -> Self {
        Self("image/jpeg".into())
    }

    pub fn image_png() -> Self {
        Self("image/png".into())
    }

    pub fn octet_stream() -> Self {
        Self("application/octet-stream".into())
    }

    /// Guess the MIME type from a file extension, falling back to `application/octet-stream`.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::image_jpeg(),
            "png" => Self::image_png(),
            "gif" => Self("image/gif".into()),
            "webp" => Self("image/webp".into()),
            "svg" => Self("image/svg+xml".into()),
            _ => Self::octet_stream(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType(s.to_string()))
    }
}

/// Raw photo payload with its MIME type and byte count.
/// 照片原始负载，包含 MIME 类型与字节数。
///
/// The bytes are immutable once stored; only the owning CV of a record may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBlob {
    pub bytes: Vec<u8>,
    pub mime_type: MimeType,
    pub size_bytes: i64,
}

impl PhotoBlob {
    /// Build a blob from bytes; the size is taken from the byte length.
    pub fn new(bytes: Vec<u8>, mime_type: MimeType) -> Self {
        let size_bytes = bytes.len() as i64;
        Self {
            bytes,
            mime_type,
            size_bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blob_records_byte_length() {
        let blob = PhotoBlob::new(vec![0xFF; 2048], MimeType::image_jpeg());
        assert_eq!(blob.size_bytes, 2048);
        assert_eq!(blob.mime_type.as_str(), "image/jpeg");
    }

    #[test]
    fn mime_from_extension_is_case_insensitive() {
        assert_eq!(MimeType::from_extension("JPG"), MimeType::image_jpeg());
        assert_eq!(MimeType::from_extension("png"), MimeType::image_png());
        assert_eq!(MimeType::from_extension("bin"), MimeType::octet_stream());
    }
}
