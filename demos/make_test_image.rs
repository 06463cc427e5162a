//! Writes `test_image.jpg`: a 400×300 photo-like image made of many slightly
//! different red, blue and green rectangles, good for trying the CLI with
//! `-k 3`.
//!
//!   cargo run --example make_test_image [output.jpg]

use std::fs::File;
use std::io::BufWriter;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;

/// Base color plus x and y ranges for the rectangles' top-left corners.
const GROUPS: [([i32; 3], (u32, u32), (u32, u32)); 3] = [
    ([200, 50, 50], (0, 150), (0, 150)),
    ([50, 100, 200], (200, 350), (0, 150)),
    ([50, 180, 80], (100, 300), (150, 270)),
];

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "test_image.jpg".to_owned());
    let mut rng = StdRng::seed_from_u64(7);
    let mut img = RgbImage::new(WIDTH, HEIGHT);

    for (base, xs, ys) in GROUPS {
        for _ in 0..50 {
            let jitter = |rng: &mut StdRng, c: i32| (c + rng.gen_range(-30..30)).clamp(0, 255) as u8;
            let color = Rgb([jitter(&mut rng, base[0]), jitter(&mut rng, base[1]), jitter(&mut rng, base[2])]);

            let x0 = rng.gen_range(xs.0..xs.1);
            let y0 = rng.gen_range(ys.0..ys.1);
            let x1 = rng.gen_range(xs.0..xs.1) + 30;
            let y1 = rng.gen_range(ys.0..ys.1) + 30;
            fill_rect(&mut img, (x0.min(x1), y0.min(y1)), (x0.max(x1), y0.max(y1)), color);
        }
    }

    let mut out = BufWriter::new(File::create(&path)?);
    JpegEncoder::new_with_quality(&mut out, 95).encode_image(&img)?;
    println!("Test image written: {path}");
    Ok(())
}

/// Fills the inclusive rectangle `from..=to`, clipped to the image.
fn fill_rect(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    for y in from.1..=to.1.min(HEIGHT - 1) {
        for x in from.0..=to.0.min(WIDTH - 1) {
            img.put_pixel(x, y, color);
        }
    }
}
