//! Image magic-byte signatures.

use std::fmt;

use serde::Serialize;

/// Number of header bytes inspected when sniffing a stream.
pub const HEADER_LEN: usize = 11;

const GIF_MAGIC: &[u8] = b"GIF8";
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const WEBP_MAGIC: &[u8] = b"WEBP";

/// APP0 (JFIF) marker.
const JPEG_APP0: u8 = 0xE0;
/// APP1 (Exif) marker.
const JPEG_APP1: u8 = 0xE1;
const JPEG_ALT_MARKER: u8 = 0xEE;
/// Exif identifier found at offset 6 in an APP1 segment.
const EXIF_ID: &[u8] = b"Exif\0";

/// Image format recognised from a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Gif,
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// MIME type of this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Gif => write!(f, "gif"),
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
            ImageFormat::Webp => write!(f, "webp"),
        }
    }
}

/// Match a full header against the known image signatures.
///
/// The JPEG check accepts `FF D8 FF E0` without looking at the JFIF
/// identifier, while `FF D8 FF E1` additionally requires `Exif\0` at
/// offset 6. `WEBP` is matched at offset 0, not inside a RIFF container.
pub fn detect_image_format(header: &[u8; HEADER_LEN]) -> Option<ImageFormat> {
    if header.starts_with(GIF_MAGIC) {
        return Some(ImageFormat::Gif);
    }
    if header.starts_with(PNG_MAGIC) {
        return Some(ImageFormat::Png);
    }
    if header.starts_with(JPEG_MAGIC) {
        let marker = header[3];
        // E0 alone, or E1 together with the Exif identifier.
        if marker == JPEG_APP0 || (marker == JPEG_APP1 && &header[6..11] == EXIF_ID) {
            return Some(ImageFormat::Jpeg);
        }
        if marker == JPEG_ALT_MARKER {
            return Some(ImageFormat::Jpeg);
        }
        return None;
    }
    if header.starts_with(WEBP_MAGIC) {
        return Some(ImageFormat::Webp);
    }
    None
}
