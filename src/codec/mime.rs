//! MIME type and file extension lookups

use std::path::Path;

/// Extension used when a MIME type is not recognized
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// MIME type used when a file extension is not recognized
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Map a MIME type to the file extension used when saving it
///
/// Total: unrecognized types map to `"unknown"`.
pub fn infer_extension(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "text/csv" => "csv",
        _ => UNKNOWN_EXTENSION,
    }
}

/// Guess a MIME type from a file path's extension
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("csv") => "text/csv",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(infer_extension("image/jpeg"), "jpg");
        assert_eq!(infer_extension("image/png"), "png");
        assert_eq!(infer_extension("image/gif"), "gif");
        assert_eq!(infer_extension("text/csv"), "csv");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(infer_extension("application/unknown-type"), "unknown");
        assert_eq!(infer_extension(""), "unknown");
        assert_eq!(infer_extension("IMAGE/PNG"), "unknown");
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("scan.JPEG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("xray.png")), "image/png");
        assert_eq!(mime_from_path(Path::new("dir/labs.csv")), "text/csv");
        assert_eq!(mime_from_path(Path::new("notes")), DEFAULT_MIME);
        assert_eq!(mime_from_path(Path::new("report.xlsx")), DEFAULT_MIME);
    }

    #[test]
    fn test_path_and_extension_agree() {
        for name in ["a.jpg", "a.png", "a.gif", "a.csv"] {
            let path = Path::new(name);
            let ext = infer_extension(mime_from_path(path));
            assert_eq!(Some(ext), path.extension().and_then(|e| e.to_str()));
        }
    }
}
