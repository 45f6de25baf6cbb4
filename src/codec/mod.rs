//! Binary/text conversions for medcrypt
//!
//! Files travel through the cipher as data-URL strings. This module reads
//! files into data-URLs, decodes data-URLs back into bytes, and maps MIME
//! types to file extensions.

pub mod data_url;
pub mod file;
pub mod mime;

pub use data_url::{
    data_url_to_file, encode_data_url, DataUrl, DecodedFile, DecryptedContent, FileDescriptor,
    DECRYPTED_FILE_STEM,
};
pub use file::{file_to_data_url, DEFAULT_MAX_FILE_SIZE};
pub use mime::{infer_extension, mime_from_path};
