//! Password Generator
//!
//! Cryptographically secure password generation.

use rand::{CryptoRng, Rng, RngCore};

use super::options::{CharClass, CharClasses};
use super::{GeneratorError, GeneratorResult};

/// Concatenate the selected class strings in lower, upper, digit, symbol
/// order. An empty selection composes all four.
pub fn compose_pool(classes: CharClasses) -> String {
    classes.effective().iter().map(CharClass::chars).collect()
}

/// Generate `length` characters drawn independently from the composed pool
/// using the thread-local CSPRNG.
///
/// `length` is not clamped here; zero is rejected.
pub fn generate(length: usize, classes: CharClasses) -> GeneratorResult<String> {
    generate_with(&mut rand::thread_rng(), length, classes)
}

/// Same as [`generate`] with a caller-supplied secure RNG.
pub fn generate_with<R>(rng: &mut R, length: usize, classes: CharClasses) -> GeneratorResult<String>
where
    R: RngCore + CryptoRng,
{
    if length == 0 {
        return Err(GeneratorError::InvalidLength(length));
    }

    let pool: Vec<char> = compose_pool(classes).chars().collect();

    // gen_range rejects out-of-zone samples, so the draw is unbiased.
    let password = (0..length)
        .map(|_| pool[rng.gen_range(0..pool.len())])
        .collect();

    Ok(password)
}

/// Calculate password strength (0-100)
pub fn password_strength(password: &str) -> u32 {
    let len = password.chars().count();
    let mut score = 0u32;

    // Length contribution (up to 40 points)
    score += (len.min(20) * 2) as u32;

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    let variety_count = [has_lower, has_upper, has_digit, has_symbol]
        .iter()
        .filter(|&&x| x)
        .count() as u32;

    // Character variety (up to 40) plus mixing bonus (up to 20)
    score += variety_count * 10 + variety_count * 5;

    score.min(100)
}

/// Get strength label for a score
pub fn strength_label(score: u32) -> &'static str {
    match score {
        0..=20 => "Very Weak",
        21..=40 => "Weak",
        41..=60 => "Fair",
        61..=80 => "Strong",
        _ => "Very Strong",
    }
}
