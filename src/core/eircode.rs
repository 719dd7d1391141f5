use crate::domain::address::Eircode;
use crate::utils::error::{PosError, Result};
use regex::Regex;
use std::sync::LazyLock;

// 1 個字母 + 2 個數字（routing key）+ 4 個英數字
static EIRCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][0-9]{2}[A-Z0-9]{4}$").expect("eircode pattern is a valid regex")
});

/// Uppercase and drop every whitespace character.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn is_valid(normalized: &str) -> bool {
    EIRCODE_PATTERN.is_match(normalized)
}

pub fn parse(raw: &str) -> Result<Eircode> {
    let normalized = normalize(raw);

    if normalized.is_empty() {
        return Err(PosError::InvalidEircode {
            input: raw.to_string(),
            reason: "Please enter an Eircode.".to_string(),
        });
    }

    if !is_valid(&normalized) {
        return Err(PosError::InvalidEircode {
            input: raw.to_string(),
            reason: format!(
                "Invalid Eircode format '{}'. Expected a code like A92 D65P.",
                normalized
            ),
        });
    }

    Ok(Eircode::new_unchecked(normalized))
}

impl std::str::FromStr for Eircode {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
