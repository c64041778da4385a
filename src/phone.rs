use serde::{Deserialize, Serialize};

/// Region rule table for destination normalization. The defaults cover the
/// shop's deployment (Argentina); other deployments substitute their own
/// table through configuration rather than code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneRules {
    pub messaging_country_code: String,
    pub bare_country_code: String,
    pub mobile_prefixes: Vec<String>,
    pub default_area_codes: Vec<String>,
    pub max_local_length: usize,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            messaging_country_code: "549".to_string(),
            bare_country_code: "54".to_string(),
            mobile_prefixes: vec!["15".to_string()],
            default_area_codes: vec!["11".to_string()],
            max_local_length: 10,
        }
    }
}

/// A gateway-addressable phone identifier, fully qualified with country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination(String);

impl Destination {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts a freeform phone string into a gateway destination. Total:
/// unrecognized shapes pass through best-effort. Rules apply in fixed
/// priority order; mobile-prefix detection must win over area-code
/// detection because the two patterns overlap for short numbers.
pub fn normalize(raw: &str, rules: &PhoneRules) -> Destination {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Destination(digits);
    }

    for prefix in &rules.mobile_prefixes {
        if digits.starts_with(prefix.as_str()) {
            let local = &digits[prefix.len()..];
            return Destination(format!("{}{}", rules.messaging_country_code, local));
        }
    }

    let starts_with_area = rules
        .default_area_codes
        .iter()
        .any(|area| digits.starts_with(area.as_str()));
    if starts_with_area && digits.len() == rules.max_local_length {
        return Destination(format!("{}{}", rules.messaging_country_code, digits));
    }

    if !digits.starts_with(rules.bare_country_code.as_str())
        && digits.len() <= rules.max_local_length
    {
        return Destination(format!("{}{}", rules.messaging_country_code, digits));
    }

    Destination(digits)
}
