use std::fmt;
use std::str::FromStr;

use regex::Regex;

/// An optional 10-digit Indian mobile number (leading digit 6-9)
#[derive(Debug, PartialEq, Clone)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Parse an optional form value. Empty input is valid absence, anything
    /// else must be a full mobile number.
    pub fn parse_optional(value: &str) -> Result<Option<Self>, String> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl FromStr for MobileNumber {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref MOBILE_REGEX: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();
        }

        if !MOBILE_REGEX.is_match(value) {
            return Err("Please enter a valid 10-digit Indian mobile number".into());
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
