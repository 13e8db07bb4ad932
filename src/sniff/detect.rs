//! Image detection by file name and header sniffing.

use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use mime_guess::mime;
use serde::Serialize;

use crate::sniff::signature::{detect_image_format, ImageFormat, HEADER_LEN};

/// Opener type for callers that have no stream to offer.
pub type NoStream = fn() -> io::Result<Cursor<&'static [u8]>>;

/// Pass to [`is_image`] when only the name is known.
pub const NO_STREAM: Option<NoStream> = None;

/// Guess from the file extension alone.
///
/// The extension is whatever follows the last `.`, so a bare `.png` counts.
/// Returns `None` when the extension has no known MIME mapping.
pub fn guess_is_image(name: &str) -> Option<bool> {
    let guess = match Path::new(name).extension() {
        Some(_) => mime_guess::from_path(name),
        None => mime_guess::from_ext(name.rsplit_once('.')?.1),
    };

    guess
        .first()
        .map(|guess| guess.type_() == mime::IMAGE)
}

/// How a name or stream was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Detection {
    /// The extension maps to a known MIME type.
    Extension { image: bool },
    /// The stream header was inspected.
    Content { format: Option<ImageFormat> },
    /// Unknown extension and no readable stream.
    Undetermined,
}

impl Detection {
    pub fn is_image(&self) -> bool {
        match self {
            Detection::Extension { image } => *image,
            Detection::Content { format } => format.is_some(),
            Detection::Undetermined => false,
        }
    }
}

/// Classify `name`, falling back to the stream behind it.
///
/// The extension decides when it maps to a known MIME type; the stream is
/// then never opened. Otherwise the stream returned by `open_stream` is
/// sniffed. I/O failures are logged and yield [`Detection::Undetermined`].
pub fn detect<F, R>(name: &str, open_stream: Option<F>) -> Detection
where
    F: FnOnce() -> io::Result<R>,
    R: Read + Seek,
{
    if let Some(image) = guess_is_image(name) {
        return Detection::Extension { image };
    }

    let Some(open_stream) = open_stream else {
        return Detection::Undetermined;
    };

    match sniff_image_format(open_stream) {
        Ok(format) => {
            tracing::debug!("Sniffed {}: {:?}", name, format);
            Detection::Content { format }
        }
        Err(e) => {
            tracing::debug!("Could not sniff {}: {}", name, e);
            Detection::Undetermined
        }
    }
}

/// Check whether `name` (or the stream behind it) is an image.
///
/// Any I/O failure while sniffing counts as "not an image".
pub fn is_image<F, R>(name: &str, open_stream: Option<F>) -> bool
where
    F: FnOnce() -> io::Result<R>,
    R: Read + Seek,
{
    detect(name, open_stream).is_image()
}

/// Open a stream and identify its image format from the header.
pub fn sniff_image_format<F, R>(open_stream: F) -> io::Result<Option<ImageFormat>>
where
    F: FnOnce() -> io::Result<R>,
    R: Read + Seek,
{
    let mut reader = BufReader::new(open_stream()?);
    peek_image_format(&mut reader)
}

/// Identify the image format at the current position without consuming it.
///
/// The reader is seeked back to where it started, whether or not the read
/// succeeded. Streams shorter than the header are never an image.
pub fn peek_image_format<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ImageFormat>> {
    let start = reader.stream_position()?;

    let mut header = Vec::with_capacity(HEADER_LEN);
    let read = reader
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header);
    reader.seek(SeekFrom::Start(start))?;
    read?;

    let header: [u8; HEADER_LEN] = match header.try_into() {
        Ok(header) => header,
        Err(_) => return Ok(None),
    };

    Ok(detect_image_format(&header))
}
