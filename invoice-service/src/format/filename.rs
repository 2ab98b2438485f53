const MAX_FILE_NAME_LEN: usize = 64;

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Make a client-supplied invoice id safe for `Content-Disposition`: runs of
/// other characters become a single `_`, the result is capped at 64 chars and
/// never empty.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_FILE_NAME_LEN));
    for c in name.chars() {
        let c = if is_safe(c) { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.truncate(MAX_FILE_NAME_LEN);

    if out.is_empty() {
        "invoice".to_string()
    } else {
        out
    }
}
