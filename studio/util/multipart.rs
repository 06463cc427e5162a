/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
        .filter(|s| !s.is_empty())
}

/// One part of a multipart/form-data body.
#[derive(Debug)]
pub struct Part<'a> {
    /// `name="..."` from Content-Disposition.
    pub name: String,
    /// `filename="..."`; `Some` (possibly empty) for file inputs.
    pub filename: Option<String>,
    pub data: &'a [u8],
}

/// Splits a multipart body into its parts. Parts without a parsable
/// Content-Disposition name are skipped.
pub fn parse_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<Part<'a>> {
    let delimiter = format!("--{}", boundary);
    let sep = b"\r\n\r\n";
    let mut result = Vec::new();

    for part in split_on(body, delimiter.as_bytes()) {
        let Some(sep_pos) = find_subsequence(part, sep) else { continue };
        let headers = String::from_utf8_lossy(&part[..sep_pos]);
        let Some(name) = disposition_param(&headers, "name") else { continue };

        let raw = &part[sep_pos + sep.len()..];
        let data = raw.strip_suffix(b"\r\n").unwrap_or(raw);
        result.push(Part {
            name,
            filename: disposition_param(&headers, "filename"),
            data,
        });
    }
    result
}

/// The first file part submitted under `field_name`.
pub fn file_part<'p, 'a>(parts: &'p [Part<'a>], field_name: &str) -> Option<&'p Part<'a>> {
    parts.iter().find(|p| p.name == field_name && p.filename.is_some())
}

/// The value of the plain-text (non-file) field `field_name`.
pub fn text_field(parts: &[Part<'_>], field_name: &str) -> Option<String> {
    parts
        .iter()
        .find(|p| p.name == field_name && p.filename.is_none())
        .and_then(|p| String::from_utf8(p.data.to_vec()).ok())
}

/// Reads `key="value"` (or `key=value`) from the Content-Disposition header
/// in a part's header block. Matches the key exactly, so `name` never picks up
/// `filename`.
fn disposition_param(headers: &str, key: &str) -> Option<String> {
    let line = headers
        .lines()
        .find(|l| l.trim_start().to_ascii_lowercase().starts_with("content-disposition:"))?;
    line.split(';').skip(1).find_map(|attr| {
        let (k, v) = attr.trim().split_once('=')?;
        if k.trim().eq_ignore_ascii_case(key) {
            Some(v.trim().trim_matches('"').to_owned())
        } else {
            None
        }
    })
}
