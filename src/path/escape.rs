//! Filename escaping and validation

/// Longest filename component accepted by the filesystem, in bytes.
pub const NAME_MAX: usize = 255;

/// Escape `text` so every byte in `bad` (and every control, non-ASCII or
/// backslash byte) is replaced with `\xNN`.
///
/// The backslash itself is always escaped, so distinct inputs never map to the
/// same output.
pub fn xescape(text: &str, bad: &str) -> String {
    let bad = bad.as_bytes();
    let mut out = String::with_capacity(text.len());

    for &b in text.as_bytes() {
        if b < b' ' || b >= 0x7f || b == b'\\' || bad.contains(&b) {
            out.push('\\');
            out.push('x');
            out.push(hex_digit(b >> 4));
            out.push(hex_digit(b & 0x0f));
        } else {
            out.push(b as char);
        }
    }

    out
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}

/// Whether `name` can be used as a single path component.
pub fn filename_is_valid(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0')
        && name.len() <= NAME_MAX
}
