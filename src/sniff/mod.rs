//! Content sniffing module.
//!
//! Provides:
//! - Extension-based image detection via MIME guessing
//! - Magic-byte detection of GIF, PNG, JPEG and WEBP headers

pub mod detect;
pub mod signature;

pub use detect::{
    detect, guess_is_image, is_image, peek_image_format, sniff_image_format, Detection, NoStream,
    NO_STREAM,
};
pub use signature::{detect_image_format, ImageFormat, HEADER_LEN};
