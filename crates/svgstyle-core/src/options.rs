use crate::error::{Error, Result};
use serde::Deserialize;

/// Declarations that are dropped outright instead of being promoted or kept.
pub const DEFAULT_EXCLUDED: &[&str] = &["-inkscape-font-specification"];

pub const DEFAULT_PRECISION: u32 = 3;

/// Pass configuration.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "precision": 3, "excluded": ["-inkscape-font-specification"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Decimal digits kept when shortening `<number><unit>` tokens in leftover style text.
    precision: u32,
    /// Lower-case property names that are removed from the style without being promoted.
    excluded: Vec<String>,
}

/// Unvalidated form of [`Options`] as it appears in JSON.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOptions {
    precision: u32,
    excluded: Vec<String>,
}

impl Default for RawOptions {
    fn default() -> Self {
        let Options {
            precision,
            excluded,
        } = Options::default();
        Self {
            precision,
            excluded,
        }
    }
}

impl RawOptions {
    fn validate(self) -> Result<Options> {
        Options {
            precision: self.precision,
            excluded: self.excluded,
        }
        .validate()
    }
}

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        RawOptions::deserialize(deserializer)?
            .validate()
            .map_err(serde::de::Error::custom)
    }
}

/// Precisions accepted by [`Options`] and the unit shortener.
pub const PRECISION_RANGE: std::ops::RangeInclusive<u32> = 1..=15;

pub(crate) fn check_precision(precision: u32) -> Result<u32> {
    if PRECISION_RANGE.contains(&precision) {
        Ok(precision)
    } else {
        Err(Error::InvalidPrecision { precision })
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON and validates them.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawOptions = serde_json::from_str(text)?;
        raw.validate()
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn with_precision(mut self, precision: u32) -> Result<Self> {
        self.precision = precision;
        self.validate()
    }

    /// Adds a property to the drop list (case-insensitive).
    pub fn with_excluded(mut self, property: impl AsRef<str>) -> Self {
        let property = property.as_ref().to_ascii_lowercase();
        if !self.excluded.contains(&property) {
            self.excluded.push(property);
        }
        self
    }

    pub fn is_excluded(&self, property: &str) -> bool {
        self.excluded.iter().any(|p| p == property)
    }

    fn validate(mut self) -> Result<Self> {
        check_precision(self.precision)?;
        for p in &mut self.excluded {
            p.make_ascii_lowercase();
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_drop_inkscape_font_specification() {
        let options = Options::default();
        assert_eq!(options.precision, 3);
        assert!(options.is_excluded("-inkscape-font-specification"));
        assert!(!options.is_excluded("fill"));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let options = Options::from_json(r#"{ "precision": 5 }"#).unwrap();
        assert_eq!(options.precision, 5);
        assert_eq!(options.excluded, Options::default().excluded);

        let options = Options::from_json(r#"{ "excluded": ["-Webkit-Foo"] }"#).unwrap();
        assert_eq!(options.precision, 3);
        assert!(options.is_excluded("-webkit-foo"));
        assert!(!options.is_excluded("-inkscape-font-specification"));
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert_eq!(
            Options::from_json(r#"{ "precision": 0 }"#).unwrap_err(),
            Error::InvalidPrecision { precision: 0 }
        );
        assert!(matches!(
            Options::from_json(r#"{ "precison": 2 }"#),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn deserializing_directly_still_validates() {
        assert!(serde_json::from_str::<Options>(r#"{ "precision": 4294967295 }"#).is_err());
        assert!(serde_json::from_str::<Options>(r#"{ "precision": 0 }"#).is_err());
        let options: Options = serde_json::from_str(r#"{ "excluded": ["Marker"] }"#).unwrap();
        assert_eq!(options.precision(), 3);
        assert_eq!(options.excluded(), ["marker".to_string()]);
    }

    #[test]
    fn with_precision_rejects_out_of_range_values() {
        assert_eq!(
            Options::default().with_precision(16).unwrap_err(),
            Error::InvalidPrecision { precision: 16 }
        );
        assert_eq!(Options::default().with_precision(15).unwrap().precision(), 15);
    }

    #[test]
    fn with_excluded_is_case_insensitive_and_deduplicated() {
        let options = Options::default()
            .with_excluded("Marker")
            .with_excluded("marker");
        assert_eq!(options.excluded.iter().filter(|p| *p == "marker").count(), 1);
    }
}
