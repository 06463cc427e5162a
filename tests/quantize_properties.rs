use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use kmeans_quant::{
    extract_palette, extract_palette_with, quantize, KMeansConfig, Palette, PixelBuffer, QuantError,
    Quantizer, Rgb,
};

const BLOCK_COLORS: [Rgb; 3] = [
    Rgb::new(220, 50, 50),
    Rgb::new(50, 100, 200),
    Rgb::new(50, 180, 80),
];

/// Three side-by-side `size × size` blocks, each pixel jittered by up to ±12
/// per channel around its block color.
fn three_blocks(size: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let width = size * 3;
    let mut pixels = Vec::with_capacity((width * size) as usize);
    for _y in 0..size {
        for x in 0..width {
            let base = BLOCK_COLORS[(x / size) as usize];
            let mut jitter = |c: u8| (c as i32 + rng.gen_range(-12..=12)).clamp(0, 255) as u8;
            pixels.push(Rgb::new(jitter(base.r), jitter(base.g), jitter(base.b)));
        }
    }
    PixelBuffer::new(width, size, pixels).unwrap()
}

fn euclid(a: Rgb, b: Rgb) -> f64 {
    (a.distance_sq(b) as f64).sqrt()
}

#[test]
fn quantize_preserves_shape() {
    let img = three_blocks(17, 1);
    let palette = extract_palette(&img, 4).unwrap();
    let out = quantize(&img, &palette).unwrap();
    assert_eq!(out.dimensions(), img.dimensions());
    assert_eq!(out.pixels().len(), img.pixels().len());
}

#[rstest]
#[case::two(2)]
#[case::three(3)]
#[case::five(5)]
#[case::ten(10)]
fn every_output_pixel_is_a_palette_entry(#[case] k: usize) {
    let img = three_blocks(20, 2);
    let result = Quantizer::with_colors(k).run(&img).unwrap();

    assert_eq!(result.palette.len(), k);
    for p in result.image.pixels() {
        assert!(result.palette.contains(*p), "{p} is not in the palette");
    }
}

#[test]
fn three_separated_blocks_give_three_matching_centroids() {
    let img = three_blocks(40, 3);
    let palette = extract_palette(&img, 3).unwrap();
    assert_eq!(palette.len(), 3);

    for truth in BLOCK_COLORS {
        let close: Vec<&Rgb> = palette.colors.iter().filter(|c| euclid(**c, truth) < 15.0).collect();
        assert_eq!(close.len(), 1, "expected exactly one centroid near {truth}, palette {:?}", palette);
    }
}

#[test]
fn extraction_is_deterministic() {
    let img = three_blocks(25, 4);
    let a = extract_palette(&img, 5).unwrap();
    let b = extract_palette(&img, 5).unwrap();
    assert_eq!(a, b);

    let cfg = KMeansConfig::new(5).with_seed(99).with_restarts(3);
    assert_eq!(extract_palette_with(&img, &cfg).unwrap(), extract_palette_with(&img, &cfg).unwrap());
}

#[test]
fn uniform_image_collapses_to_one_color() {
    let color = Rgb::new(123, 45, 67);
    let img = PixelBuffer::filled(16, 9, color);

    let result = Quantizer::with_colors(3).run(&img).unwrap();
    assert_eq!(result.palette, Palette::new(vec![color]));
    assert_eq!(result.image, img);
    assert!(result.runs.is_empty());
}

#[test]
fn two_color_image_with_k_three_keeps_both_colors() {
    let mut pixels = vec![Rgb::new(0, 0, 0); 10];
    pixels.extend(vec![Rgb::WHITE; 10]);
    let img = PixelBuffer::new(5, 4, pixels).unwrap();

    let result = Quantizer::with_colors(3).run(&img).unwrap();
    assert_eq!(result.palette.colors, vec![Rgb::new(0, 0, 0), Rgb::WHITE]);
    assert_eq!(result.image, img);
}

#[test]
fn remapping_is_idempotent() {
    let img = three_blocks(15, 5);
    let palette = extract_palette(&img, 4).unwrap();
    let once = quantize(&img, &palette).unwrap();
    let twice = quantize(&once, &palette).unwrap();
    assert_eq!(once, twice);
}

#[rstest]
#[case::zero(0)]
#[case::above_default_max(300)]
fn invalid_k_is_rejected(#[case] k: usize) {
    let img = three_blocks(4, 6);
    assert!(matches!(extract_palette(&img, k), Err(QuantError::InvalidK { .. })));
}

#[test]
fn configured_maximum_is_enforced() {
    let img = three_blocks(4, 6);
    let cfg = KMeansConfig::new(11).with_max_k(10);
    assert!(matches!(
        extract_palette_with(&img, &cfg),
        Err(QuantError::InvalidK { k: 11, max: 10 })
    ));
}

#[test]
fn raw_rgb_round_trip_through_the_pipeline() {
    let img = three_blocks(10, 8);
    let raw = img.to_raw();
    let rebuilt = PixelBuffer::from_raw(img.width(), img.height(), &raw).unwrap();
    assert_eq!(rebuilt, img);

    let result = Quantizer::with_colors(3).run(&rebuilt).unwrap();
    assert_eq!(result.image.to_raw().len(), raw.len());
}

/// More distinct colors than one assignment chunk holds, so the parallel
/// passes really are split across workers.
fn noisy(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height).map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen())).collect();
    PixelBuffer::new(width, height, pixels).unwrap()
}

#[test]
fn palette_does_not_depend_on_thread_count() {
    let img = noisy(200, 100, 9);
    assert!(img.histogram().len() > 4096);

    let cfg = KMeansConfig::new(6).with_restarts(3);
    let run_with = |threads: usize| {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        pool.install(|| {
            let palette = extract_palette_with(&img, &cfg).unwrap();
            let image = quantize(&img, &palette).unwrap();
            (palette, image)
        })
    };

    let (one_palette, one_image) = run_with(1);
    let (many_palette, many_image) = run_with(8);
    assert_eq!(one_palette, many_palette);
    assert_eq!(one_image, many_image);
}
