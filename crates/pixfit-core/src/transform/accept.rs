//! Input acceptance by MIME type with a filename-extension fallback.

use crate::types::InputAcceptance;

const JPEG_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg"];
const EXTENDED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
    "image/bmp",
];

const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
const EXTENDED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// MIME types accepted in `mode`.
pub fn accepted_mime_types(mode: InputAcceptance) -> &'static [&'static str] {
    match mode {
        InputAcceptance::Jpeg => JPEG_MIME_TYPES,
        InputAcceptance::Extended => EXTENDED_MIME_TYPES,
    }
}

/// File extensions (lowercase, no dot) accepted in `mode`.
pub fn accepted_extensions(mode: InputAcceptance) -> &'static [&'static str] {
    match mode {
        InputAcceptance::Jpeg => JPEG_EXTENSIONS,
        InputAcceptance::Extended => EXTENDED_EXTENSIONS,
    }
}

/// Decide whether an input is offered to the converter.
///
/// A recognized MIME type wins; otherwise the file name's extension is
/// checked, case-insensitively.
pub fn is_accepted(mime: Option<&str>, file_name: &str, mode: InputAcceptance) -> bool {
    let mime_ok = mime.is_some_and(|m| {
        accepted_mime_types(mode)
            .iter()
            .any(|t| t.eq_ignore_ascii_case(m.trim()))
    });
    mime_ok || extension_accepted(file_name, mode)
}

fn extension_accepted(file_name: &str, mode: InputAcceptance) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            accepted_extensions(mode)
                .iter()
                .any(|a| a.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_mode_by_mime() {
        assert!(is_accepted(Some("image/jpeg"), "blob", InputAcceptance::Jpeg));
        assert!(is_accepted(Some("IMAGE/JPG"), "blob", InputAcceptance::Jpeg));
        assert!(!is_accepted(Some("image/png"), "blob", InputAcceptance::Jpeg));
    }

    #[test]
    fn test_jpeg_mode_extension_fallback() {
        assert!(is_accepted(None, "holiday.JPG", InputAcceptance::Jpeg));
        assert!(is_accepted(Some(""), "holiday.jpeg", InputAcceptance::Jpeg));
        assert!(!is_accepted(None, "holiday.png", InputAcceptance::Jpeg));
        assert!(!is_accepted(None, "jpg", InputAcceptance::Jpeg));
    }

    #[test]
    fn test_unreliable_mime_falls_back_to_extension() {
        assert!(is_accepted(
            Some("application/octet-stream"),
            "scan.jpg",
            InputAcceptance::Jpeg
        ));
    }

    #[test]
    fn test_extended_mode() {
        for name in ["a.png", "b.webp", "c.gif", "d.BMP", "e.jpg"] {
            assert!(is_accepted(None, name, InputAcceptance::Extended), "{name}");
        }
        assert!(is_accepted(Some("image/webp"), "x", InputAcceptance::Extended));
        assert!(!is_accepted(None, "f.tiff", InputAcceptance::Extended));
        assert!(!is_accepted(Some("text/plain"), "g.txt", InputAcceptance::Extended));
    }
}
