//! Byte encoding of printer commands.
//!
//! Every function here is pure: it returns the exact bytes to send and never
//! touches the sink. The printer has no way to report a malformed command,
//! so these sequences are tested against literal expected output.

use crate::{
    config::PrinterConfig,
    error::Error,
    raster::{check_width, ImageRow},
    style::{TextStyle, TitleLevel},
};

/// ESC, prefix of the heating, print mode and alignment commands.
pub const ESC: u8 = 27;

/// GS, prefix of the invert command.
pub const GS: u8 = 29;

/// DC2, prefix of the density and bitmap commands.
pub const DC2: u8 = 18;

/// Line feed, prints the buffered line.
pub const LF: u8 = b'\n';

pub const HEATING: u8 = b'7';
pub const DENSITY: u8 = b'#';
pub const BITMAP: u8 = b'*';
pub const PRINT_MODE: u8 = b'!';
pub const INVERT: u8 = b'B';
pub const ALIGN: u8 = b'a';

/// Heating setup followed by print density.
///
/// `ESC 7 dots heat_time heat_interval` then `DC2 # (density << 5 | break_time)`.
pub fn config(config: &PrinterConfig) -> Vec<u8> {
    vec![
        ESC,
        HEATING,
        config.dots(),
        config.heat_time(),
        config.heat_interval(),
        DC2,
        DENSITY,
        config.density_byte(),
    ]
}

/// `DC2 * 1 width` bitmap header for a single 1-line-high row.
///
/// `width` is in bytes (x8 pixels) and must be in `1..=48`.
pub fn image_row_header(width: usize) -> Result<Vec<u8>, Error> {
    check_width(width)?;
    Ok(vec![DC2, BITMAP, 1, width as u8])
}

/// Bitmap header followed by the packed row bits.
pub fn image_row(row: &ImageRow) -> Result<Vec<u8>, Error> {
    let mut buf = image_row_header(row.width_bytes())?;
    buf.extend_from_slice(row.as_bytes());
    Ok(buf)
}

pub fn line_break(n: usize) -> Vec<u8> {
    vec![LF; n]
}

pub fn print_mode(mode: u8) -> Vec<u8> {
    vec![ESC, PRINT_MODE, mode]
}

pub fn invert(on: bool) -> Vec<u8> {
    vec![GS, INVERT, on as u8]
}

pub fn center(on: bool) -> Vec<u8> {
    vec![ESC, ALIGN, on as u8]
}

/// Commands selecting `style`, in the order alignment, print mode, invert.
pub fn apply_style(style: TextStyle) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    if style.contains(TextStyle::CENTERED) {
        frames.push(center(true));
    }
    if style.print_mode() != 0 {
        frames.push(print_mode(style.print_mode()));
    }
    if style.contains(TextStyle::INVERTED) {
        frames.push(invert(true));
    }
    frames
}

/// Commands returning to plain, non-inverted, left aligned text.
pub fn reset_style() -> Vec<Vec<u8>> {
    vec![print_mode(0), invert(false), center(false)]
}

/// A complete title: blank line, style, `" text \n"`, reset, blank line.
pub fn title(text: &str, level: TitleLevel) -> Vec<Vec<u8>> {
    let mut chunks = vec![line_break(1)];
    chunks.extend(apply_style(level.style()));
    chunks.push(format!(" {} \n", text).into_bytes());
    chunks.extend(reset_style());
    chunks.push(line_break(1));
    chunks
}
