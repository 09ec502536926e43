use serde::{Deserialize, Deserializer};

/// Accounts are keyed by trimmed, lowercased email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}

pub fn deserialize_optional_email<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| normalize_email(&s)))
}
