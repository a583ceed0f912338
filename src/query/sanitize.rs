//! Input sanitizer for free-text filter values
//!
//! The query layer only does in-memory equality/substring matching, so this
//! is a defense-in-depth contract rather than a live injection vector:
//! quote/angle-bracket characters, SQL comment markers, and a fixed keyword
//! blocklist are removed before a value reaches the engine.
//!
//! Order matters for idempotence: the character whitelist runs first, so
//! deleting a character can never splice a blocklisted keyword back together
//! for the next pass to find.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum sanitized length in characters.
const MAX_LENGTH: usize = 100;

/// Characters allowed through: word chars, whitespace, - _ . , & ( )
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\-_.,&()]").expect("valid whitelist pattern"));

/// Comment markers and script/SQL keywords, removed case-insensitively.
static BLOCKED_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)--|/\*|\*/|script|select|insert|update|delete|drop|union|exec")
        .expect("valid blocklist pattern")
});

/// Sanitize a free-text filter value.
///
/// Deterministic and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
/// Empty input is returned unchanged.
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let cleaned = DISALLOWED_CHARS.replace_all(input, "");

    // Removing a token can expose another occurrence ("selselectect"),
    // so strip to a fixpoint.
    let mut stripped = cleaned.into_owned();
    loop {
        let next = BLOCKED_TOKENS.replace_all(&stripped, "").into_owned();
        if next == stripped {
            break;
        }
        stripped = next;
    }

    stripped.chars().take(MAX_LENGTH).collect::<String>().trim().to_string()
}
