//! Data-URL encoding and decoding
//!
//! Files are carried through encryption as `data:<mime>;base64,<payload>`
//! strings so that the cipher only ever sees text.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{MedcryptError, MedcryptResult};

use super::mime::infer_extension;

const SCHEME: &str = "data:";

/// Base name given to files recovered from decrypted output
pub const DECRYPTED_FILE_STEM: &str = "decrypted-file";

/// Binary content tagged with its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type, e.g. `image/png`
    pub mime: String,
    /// Raw content
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Create a data-URL value from raw bytes
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` string
    pub fn parse(s: &str) -> MedcryptResult<Self> {
        let (mime, payload) = split_data_url(s)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| MedcryptError::parse(format!("invalid base64 payload: {}", e)))?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{};base64,{}", SCHEME, self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Split a data-URL into its MIME type and base64 payload
fn split_data_url(s: &str) -> MedcryptResult<(&str, &str)> {
    let rest = s
        .strip_prefix(SCHEME)
        .ok_or_else(|| MedcryptError::parse("missing 'data:' prefix"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| MedcryptError::parse("missing ',' separator"))?;

    let (mime, params) = header
        .split_once(';')
        .ok_or_else(|| MedcryptError::parse("missing ';base64' marker"))?;

    if mime.is_empty() {
        return Err(MedcryptError::parse("missing MIME type"));
    }

    // Parameters such as charset may precede the encoding marker
    let encoding = params.rsplit(';').next().unwrap_or_default();
    if !encoding.eq_ignore_ascii_case("base64") {
        return Err(MedcryptError::parse("payload is not base64 encoded"));
    }

    Ok((mime, payload))
}

/// Encode raw bytes as a data-URL string
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("{}{};base64,{}", SCHEME, mime, STANDARD.encode(bytes))
}

/// A file reconstructed from a data-URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode a data-URL back into file content
pub fn data_url_to_file(data_url: &str, file_name: &str) -> MedcryptResult<DecodedFile> {
    let DataUrl { mime, bytes } = DataUrl::parse(data_url)?;
    Ok(DecodedFile {
        file_name: file_name.to_string(),
        mime,
        bytes,
    })
}

/// MIME type and suggested filename for a data-URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub mime: String,
    pub file_name: String,
}

impl FileDescriptor {
    /// Describe the file held in a data-URL
    ///
    /// Never fails: a header that cannot be read yields MIME `unknown` and
    /// extension `unknown`.
    pub fn from_data_url(data_url: &str) -> Self {
        let mime = split_data_url(data_url)
            .map(|(mime, _)| mime)
            .unwrap_or("unknown");
        Self::for_mime(mime)
    }

    fn for_mime(mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
            file_name: format!("{}.{}", DECRYPTED_FILE_STEM, infer_extension(mime)),
        }
    }

    /// Extension part of the suggested filename
    pub fn extension(&self) -> &str {
        infer_extension(&self.mime)
    }
}

/// Decrypted output, told apart by whether it carries a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptedContent {
    /// Plain text, including text that only looks like a data-URL
    Text(String),
    /// A well-formed data-URL produced from a file
    File {
        descriptor: FileDescriptor,
        content: DataUrl,
    },
}

impl DecryptedContent {
    /// Classify a decrypted string
    ///
    /// Strings that do not parse as a data-URL stay text, even when they
    /// start with `data:`.
    pub fn classify(decrypted: String) -> Self {
        match DataUrl::parse(&decrypted) {
            Ok(content) => Self::File {
                descriptor: FileDescriptor::for_mime(&content.mime),
                content,
            },
            Err(_) => Self::Text(decrypted),
        }
    }

    /// Take the decoded file; fails with a parse error for text
    pub fn into_file(self) -> MedcryptResult<DecodedFile> {
        match self {
            Self::File {
                descriptor,
                content,
            } => Ok(DecodedFile {
                file_name: descriptor.file_name,
                mime: content.mime,
                bytes: content.bytes,
            }),
            Self::Text(_) => Err(MedcryptError::parse("decrypted content is not a file")),
        }
    }
}
