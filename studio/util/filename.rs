/// Upload extensions the converter accepts.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// `true` if `filename` has one of `ALLOWED_EXTENSIONS` (case-insensitive).
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Reduces a client-supplied filename to something safe to echo back in a
/// Content-Disposition header.
///
/// Directory components are dropped, whitespace becomes `_`, anything other
/// than ASCII alphanumerics, `.`, `-` and `_` is removed, and leading dots or
/// underscores are stripped. An empty result becomes `image`.
pub fn secure_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let trimmed = cleaned.trim_start_matches(['.', '_']).trim_end_matches(['.', '_']);
    if trimmed.is_empty() {
        "image".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::png("a.png", true)]
    #[case::upper_jpeg("HOLIDAY.JPEG", true)]
    #[case::gif("x.y.gif", true)]
    #[case::webp("pic.webp", false)]
    #[case::no_ext("bmp", false)]
    #[case::empty("", false)]
    fn extension_filter(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(allowed_file(name), ok);
    }

    #[rstest]
    #[case::plain("photo.jpg", "photo.jpg")]
    #[case::spaces("my cat photo.png", "my_cat_photo.png")]
    #[case::traversal("../../etc/passwd", "passwd")]
    #[case::windows_path("C:\\Users\\me\\pic.bmp", "pic.bmp")]
    #[case::hidden("..hidden.gif", "hidden.gif")]
    #[case::non_ascii("照片.jpg", "jpg")]
    #[case::nothing_left("///", "image")]
    fn filenames_are_sanitized(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(secure_filename(input), expected);
    }
}
