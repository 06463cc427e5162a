use log::{info, warn};
use serde::Serialize;
use tiny_http::Request;

use kmeans_quant::io::{decode_image, encode_bmp, output_file_name};
use kmeans_quant::{ColorRecord, QuantError, Quantized, Quantizer};

use crate::handlers::index::show_error;
use crate::handlers::upload::{read_upload, Upload};
use crate::routes::HttpResponse;
use crate::state::SharedState;

#[derive(Serialize)]
struct PreviewBody {
    success: bool,
    colors: Vec<ColorRecord>,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// POST /convert
// ---------------------------------------------------------------------------

/// Quantizes the uploaded image and returns it as a BMP download named
/// `<stem>_<k>colors.bmp`. Failures re-render the form with the reason.
pub fn handle_convert(request: &mut Request, state: &SharedState) -> HttpResponse {
    let upload = match read_upload(request, state.config.max_upload_bytes) {
        Ok(u) => u,
        Err(e) => return show_error(state, e.status(), &e.message()),
    };

    let result = match process(&upload) {
        Ok(r) => r,
        Err(e) => return show_error(state, error_status(&e), &format!("Error while processing image: {e}")),
    };

    match encode_bmp(&result.image) {
        Ok(bytes) => {
            let name = output_file_name(&upload.file_name, upload.n_colors);
            crate::routes::bmp_download_response(bytes, &name)
        }
        Err(e) => show_error(state, 500, &format!("Error while processing image: {e}")),
    }
}

// ---------------------------------------------------------------------------
// POST /preview
// ---------------------------------------------------------------------------

/// Same inputs as `/convert`; answers with the palette as JSON records.
pub fn handle_preview(request: &mut Request, state: &SharedState) -> HttpResponse {
    let upload = match read_upload(request, state.config.max_upload_bytes) {
        Ok(u) => u,
        Err(e) => return json_error(e.status(), e.message()),
    };

    match process(&upload) {
        Ok(result) => match preview_json(&result) {
            Ok(json) => crate::routes::json_response(200, json),
            Err(e) => json_error(500, e.to_string()),
        },
        Err(e) => json_error(error_status(&e), e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn process(upload: &Upload) -> Result<Quantized, QuantError> {
    let buffer = decode_image(&upload.bytes)?;
    let result = Quantizer::with_colors(upload.n_colors).run(&buffer)?;
    info!(
        "{}: {}x{} -> {} colors in {} ms",
        upload.file_name,
        buffer.width(),
        buffer.height(),
        result.palette.len(),
        result.elapsed_ms
    );
    Ok(result)
}

fn preview_json(result: &Quantized) -> serde_json::Result<String> {
    serde_json::to_string(&PreviewBody {
        success: true,
        message: format!("Extracted {} main colors.", result.palette.len()),
        colors: result.palette.records(),
    })
}

/// Undecodable or degenerate uploads are the client's problem; anything else
/// is ours.
fn error_status(e: &QuantError) -> u16 {
    match e {
        QuantError::Decode(_) | QuantError::EmptyImage | QuantError::InvalidK { .. } => 400,
        _ => {
            warn!("image processing failed: {e}");
            500
        }
    }
}

fn json_error(status: u16, error: String) -> HttpResponse {
    crate::routes::json_response(status, error_json(error))
}

fn error_json(error: String) -> String {
    serde_json::to_string(&ErrorBody { error })
        .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmeans_quant::{PixelBuffer, Rgb};
    use rstest::rstest;
    use std::io::Cursor;

    fn undecodable() -> QuantError {
        decode_image(b"not an image").unwrap_err()
    }

    fn two_color_png() -> Vec<u8> {
        let mut img = image::RgbImage::new(4, 2);
        for (x, _, px) in img.enumerate_pixels_mut() {
            *px = if x < 2 { image::Rgb([220, 50, 50]) } else { image::Rgb([50, 100, 200]) };
        }
        let mut out = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[rstest]
    #[case::decode(undecodable(), 400)]
    #[case::empty_image(QuantError::EmptyImage, 400)]
    #[case::invalid_k(QuantError::InvalidK { k: 0, max: 256 }, 400)]
    #[case::dimension_mismatch(QuantError::DimensionMismatch { expected: 12, actual: 11 }, 500)]
    #[case::empty_palette(QuantError::EmptyPalette, 500)]
    #[case::invalid_iterations(QuantError::InvalidIterations, 500)]
    #[case::invalid_hex(QuantError::InvalidHex("#xyz".to_owned()), 500)]
    #[case::io(QuantError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")), 500)]
    fn client_errors_are_400_and_the_rest_500(#[case] err: QuantError, #[case] status: u16) {
        assert_eq!(error_status(&err), status);
    }

    #[test]
    fn preview_body_lists_the_palette() {
        let upload = Upload { file_name: "tiny.png".to_owned(), bytes: two_color_png(), n_colors: 3 };
        let result = process(&upload).unwrap();
        assert_eq!(
            result.image,
            PixelBuffer::new(
                4,
                2,
                [Rgb::new(220, 50, 50), Rgb::new(220, 50, 50), Rgb::new(50, 100, 200), Rgb::new(50, 100, 200)]
                    .repeat(2),
            )
            .unwrap()
        );

        let json: serde_json::Value = serde_json::from_str(&preview_json(&result).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "colors": [
                    { "rgb": "RGB(50, 100, 200)", "hex": "#3264c8" },
                    { "rgb": "RGB(220, 50, 50)", "hex": "#dc3232" },
                ],
                "message": "Extracted 2 main colors.",
            })
        );
    }

    #[test]
    fn error_body_has_a_single_error_field() {
        let json: serde_json::Value = serde_json::from_str(&error_json("bad \"input\"".to_owned())).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "bad \"input\"" }));
    }

    #[test]
    fn json_error_carries_its_status() {
        assert_eq!(json_error(413, "too big".to_owned()).status_code().0, 413);
    }

    #[test]
    fn garbage_upload_is_a_client_error() {
        let upload = Upload { file_name: "x.png".to_owned(), bytes: b"nope".to_vec(), n_colors: 3 };
        let err = process(&upload).unwrap_err();
        assert_eq!(error_status(&err), 400);
    }
}
