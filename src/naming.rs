//! Name conversions between JSON keys and emitted identifiers.
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[_\p{XID_Start}]\p{XID_Continue}*$").expect("identifier pattern")
});

const PY_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// `snake_case_string` → `SnakeCaseString`, `id` → `Id`.
///
/// Each underscore-separated segment is title-cased and the segments are
/// concatenated; empty segments (leading, trailing or doubled underscores)
/// vanish.
pub fn snake_to_pascal(word: &str) -> String {
    word.split('_').map(title_case).collect()
}

/// Title-cases one segment: a letter that follows a non-letter (or starts the
/// segment) is upper-cased, every other letter lower-cased. Non-letters pass
/// through, so `2fa` → `2Fa` and `zipCode` → `Zipcode`.
pub fn title_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut after_letter = false;
    for c in segment.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// `userId` → `user_id`, `HTTPServer` → `http_server`, `first-name` → `first_name`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ' | '.') {
            if !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_numeric() => true,
                // end of an acronym: `HTTPServer` splits before the `S`
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// True if `name` can be used as a class or attribute name in the output.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !PY_KEYWORDS.contains(&name)
}
