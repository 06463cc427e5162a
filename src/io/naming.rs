use std::path::{Path, PathBuf};

/// `<dir>/<stem>_<k>colors.bmp`, next to the input file.
pub fn default_output_path(input: &Path, k: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    input.with_file_name(format!("{stem}_{k}colors.bmp"))
}

/// Download name for an already-sanitized upload name: `<stem>_<k>colors.bmp`.
pub fn output_file_name(file_name: &str, k: usize) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_owned());
    format!("{stem}_{k}colors.bmp")
}
