//! Output file naming
//!
//! Generated names look like `<safe-base>-<unix millis>-<6 base36 chars>.jpg`.
//! The timestamp and random suffix make collisions unlikely, not impossible.

use chrono::Utc;
use folio_core::constants::{MAX_BASE_NAME_LEN, OUTPUT_EXTENSION, RANDOM_SUFFIX_LEN};
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("valid extension regex"));
static UNSAFE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid unsafe-run regex"));

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Reduce an original file name to a lowercase ASCII slug without extension.
///
/// Combining marks are dropped after canonical decomposition, so `é` becomes
/// `e`. Any other run of characters outside `[a-z0-9]` becomes one hyphen.
/// The result is cut to 30 characters and may be empty.
pub fn sanitize_base_name(original: &str) -> String {
    let stem = EXTENSION_RE.replace(original, "");
    let folded: String = stem
        .to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    UNSAFE_RUN_RE
        .replace_all(&folded, "-")
        .chars()
        .take(MAX_BASE_NAME_LEN)
        .collect()
}

/// Fresh output name for `original` using the current time and thread RNG.
pub fn generate_file_name(original: &str) -> String {
    file_name_with(original, Utc::now().timestamp_millis(), &mut rand::rng())
}

/// Output name with an explicit timestamp and random source.
pub fn file_name_with<R: Rng>(original: &str, millis: i64, rng: &mut R) -> String {
    format!(
        "{}-{}-{}.{}",
        sanitize_base_name(original),
        millis,
        random_suffix(rng),
        OUTPUT_EXTENSION
    )
}

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}
