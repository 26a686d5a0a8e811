//! PNG decoding into the matcher's pixel format.

use std::io::Cursor;

use bead_pattern::Frame;

/// Error type for image decoding
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("Unsupported PNG color type: {0}")]
    UnsupportedColorType(String),
}

/// Decode a PNG into an RGBA8 [`Frame`].
///
/// The decoder expands palette and grayscale images and strips 16-bit
/// channels, so any valid PNG ends up as 8-bit RGBA. Transparency is
/// preserved; pixels with alpha 0 become empty cells downstream.
pub fn decode_png(bytes: &[u8]) -> Result<Frame, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(
        png::Transformations::EXPAND | png::Transformations::ALPHA | png::Transformations::STRIP_16,
    );

    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    // After EXPAND | ALPHA the frame is RGBA or grayscale-alpha
    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => return Err(CodecError::UnsupportedColorType(format!("{other:?}"))),
    };

    Ok(Frame::from_rgba8(info.width, info.height, data))
}
