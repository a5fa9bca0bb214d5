/// Audio file extensions recognised by default (lowercase, without dot).
pub const KNOWN_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg"];

/// Shown when a filename normalizes to nothing.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

const MAX_WORDS: usize = 3;

/// Turn a raw track filename into a short display title.
///
/// Drops a bracketed release tag (from the first `[` through the first `-`
/// after it), a trailing audio extension and surrounding whitespace, then keeps
/// at most the first three space-separated words.
pub fn display_title(filename: &str) -> String {
    let untagged = strip_bracket_tag(filename);
    let title = strip_audio_extension(&untagged).trim();

    let short = title.split(' ').take(MAX_WORDS).collect::<Vec<_>>().join(" ");
    if short.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        short
    }
}

fn strip_bracket_tag(s: &str) -> String {
    let Some(open) = s.find('[') else {
        return s.to_string();
    };
    match s[open..].find('-') {
        Some(rel) => {
            let end = open + rel + 1;
            format!("{}{}", &s[..open], &s[end..])
        }
        None => s.to_string(),
    }
}

fn strip_audio_extension(s: &str) -> &str {
    let lower = s.to_ascii_lowercase();
    for ext in KNOWN_EXTENSIONS {
        let suffix_len = ext.len() + 1;
        if lower.len() >= suffix_len
            && lower.ends_with(ext)
            && lower.as_bytes()[lower.len() - suffix_len] == b'.'
        {
            return &s[..s.len() - suffix_len];
        }
    }
    s
}
