//! Image decoding / encoding adapters around the quantization core.
//!
//! Everything that touches a file format lives here; the clustering and
//! remapping code only ever sees a `PixelBuffer`.

use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::ColorType;

use crate::color::buffer::PixelBuffer;
use crate::error::Result;

/// Decodes PNG / JPEG / BMP / GIF bytes into an RGB buffer.
///
/// Every color mode is converted to RGBA first and then composited over a
/// white background, so transparent regions come out white.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba_over_white(width, height, rgba.as_raw())
}

/// Reads and decodes an image file.
pub fn open_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Encodes the buffer as a 24-bit BMP.
pub fn encode_bmp(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let raw = buffer.to_raw();
    BmpEncoder::new(&mut out).encode(&raw, buffer.width(), buffer.height(), ColorType::Rgb8)?;
    Ok(out)
}

/// Encodes the buffer as BMP and writes it to `path`.
pub fn save_bmp<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let bytes = encode_bmp(buffer)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb::Rgb;
    use std::io::Cursor;

    fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn transparent_png_decodes_to_white() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 0]));

        let buf = decode_image(&png_bytes(img)).unwrap();
        assert_eq!(buf.dimensions(), (2, 1));
        assert_eq!(buf.pixels(), &[Rgb::new(10, 20, 30), Rgb::WHITE]);
    }

    #[test]
    fn bmp_output_decodes_back_to_the_same_pixels() {
        let buf = PixelBuffer::new(
            2,
            2,
            vec![Rgb::new(220, 50, 50), Rgb::new(50, 100, 200), Rgb::new(50, 180, 80), Rgb::WHITE],
        )
        .unwrap();

        let bytes = encode_bmp(&buf).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        assert_eq!(decode_image(&bytes).unwrap(), buf);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, crate::error::QuantError::Decode(_)));
    }
}
