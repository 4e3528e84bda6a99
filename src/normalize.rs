use once_cell::sync::Lazy;
use regex::Regex;

/// Every single ASCII uppercase letter, individually.
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("([A-Z])").unwrap());

/// Maximal runs of anything outside `[0-9a-zA-Z]`.
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new("[^0-9a-zA-Z]+").unwrap());

/// Simplifies arbitrary header or file-name text into a safe SQL identifier.
///
/// - each uppercase letter is replaced by an underscore plus its lowercase
///   form, one underscore per letter, so `PronounceGIF` becomes
///   `pronounce_g_i_f` (acronyms are not special-cased)
/// - each run of non-alphanumeric characters collapses to one underscore
/// - exactly one leading underscore, if present, is stripped
///
/// Pure and total: never fails, never touches I/O. Distinct inputs can map
/// to the same output (`Id` and `id` both become `id`); nothing here
/// deduplicates, the database rejects duplicate columns at CREATE time.
pub fn simplify(text: &str) -> String {
    let unified = UPPERCASE.replace_all(text, "_$1").to_lowercase();
    let unified = NON_ALNUM.replace_all(&unified, "_");
    match unified.strip_prefix('_') {
        Some(rest) => rest.to_string(),
        None => unified.into_owned(),
    }
}
