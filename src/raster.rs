//! Conversion of pixel data into 1-bit printer rows.
//!
//! A pixel prints black when it is mostly opaque and dark:
//! alpha above [`ALPHA_THRESHOLD`] and `R + G + B` below [`SUM_THRESHOLD`].
//! Bits are packed most significant bit first, 8 horizontal pixels per byte.
use image::{GenericImageView, Pixel};

use crate::{error::Error, MAX_ROW_BYTES, MAX_ROW_PIXELS};

/// Alpha must be strictly above this value for a pixel to print.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Sum of the colour channels must be strictly below this value.
pub const SUM_THRESHOLD: u16 = 384;

/// One print line of packed 1-bit pixels, 1 to 48 bytes wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    bytes: Vec<u8>,
}

impl ImageRow {
    /// Wrap packed row bytes, rejecting widths outside `1..=48`.
    pub fn new(bytes: Vec<u8>) -> Result<Self, Error> {
        check_width(bytes.len())?;
        Ok(ImageRow { bytes })
    }

    pub fn width_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub(crate) fn check_width(width: usize) -> Result<(), Error> {
    if width == 0 || width > MAX_ROW_BYTES {
        Err(Error::InvalidRowWidth(width))
    } else {
        Ok(())
    }
}

/// Threshold rule applied to a single RGBA pixel.
pub fn is_black(rgba: [u8; 4]) -> bool {
    let sum = rgba[0] as u16 + rgba[1] as u16 + rgba[2] as u16;
    rgba[3] > ALPHA_THRESHOLD && sum < SUM_THRESHOLD
}

/// Pack one line of RGBA pixels into row bytes.
///
/// A trailing partial byte is padded with white bits.
pub fn pack_row(pixels: &[[u8; 4]]) -> Vec<u8> {
    pixels
        .chunks(8)
        .map(|chunk| {
            let mut tmp: u8 = 0x00;
            for (i, pixel) in chunk.iter().enumerate() {
                if is_black(*pixel) {
                    tmp |= 0x80 >> i;
                }
            }
            tmp
        })
        .collect()
}

/// Convert an image into printer rows, one row per pixel line.
///
/// Images wider than 384 pixels are rejected rather than cropped.
pub fn rasterize<I>(image: &I) -> Result<Vec<ImageRow>, Error>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    if width > MAX_ROW_PIXELS {
        return Err(Error::ImageTooWide(width));
    }

    let mut rows = Vec::with_capacity(height as usize);
    let mut line: Vec<[u8; 4]> = Vec::with_capacity(width as usize);
    for y in 0..height {
        line.clear();
        for x in 0..width {
            line.push(image.get_pixel(x, y).to_rgba().0);
        }
        rows.push(ImageRow::new(pack_row(&line))?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    const BLACK: [u8; 4] = [0, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    #[test]
    fn test_threshold_rule() {
        assert!(is_black(BLACK));
        assert!(!is_black(WHITE));
        // transparent black does not print
        assert!(!is_black([0, 0, 0, 127]));
        assert!(is_black([0, 0, 0, 128]));
        assert!(is_black([128, 128, 127, 255]));
        assert!(!is_black([128, 128, 128, 255]));
    }

    #[test]
    fn test_pack_row_msb_first() {
        let mut pixels = vec![WHITE; 8];
        pixels[0] = BLACK;
        pixels[7] = BLACK;
        assert_eq!(pack_row(&pixels), vec![0b1000_0001]);
    }

    #[test]
    fn test_pack_row_pads_partial_byte() {
        let pixels = vec![BLACK; 10];
        assert_eq!(pack_row(&pixels), vec![0xFF, 0b1100_0000]);
    }

    #[test]
    fn test_row_width_limits() {
        assert!(ImageRow::new(vec![0; 1]).is_ok());
        assert!(ImageRow::new(vec![0; 48]).is_ok());
        assert!(matches!(
            ImageRow::new(vec![]),
            Err(Error::InvalidRowWidth(0))
        ));
        assert!(matches!(
            ImageRow::new(vec![0; 49]),
            Err(Error::InvalidRowWidth(49))
        ));
    }

    #[test]
    fn test_rasterize_checkerboard() {
        let image = RgbaImage::from_fn(16, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba(BLACK)
            } else {
                Rgba(WHITE)
            }
        });

        let rows = rasterize(&image).unwrap();

        assert_eq!(rows.len(), 8);
        for (y, row) in rows.iter().enumerate() {
            let expected = if y % 2 == 0 { 0b1010_1010 } else { 0b0101_0101 };
            assert_eq!(row.as_bytes(), &[expected, expected]);
        }
    }

    #[test]
    fn test_rasterize_rejects_wide_image() {
        let image = RgbaImage::new(385, 1);
        assert!(matches!(rasterize(&image), Err(Error::ImageTooWide(385))));
    }

    #[test]
    fn test_rasterize_full_width() {
        let image = RgbaImage::from_pixel(384, 2, Rgba(BLACK));
        let rows = rasterize(&image).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width_bytes(), 48);
        assert!(rows[0].as_bytes().iter().all(|b| *b == 0xFF));
    }
}
