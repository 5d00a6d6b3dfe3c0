//! Geolocation records

/// Sentinel for any field no provider could supply
pub const UNKNOWN: &str = "N/A";

/// Fields a single geo provider managed to extract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFields {
    pub ip: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub isp: Option<String>,
}

/// Fully resolved location
///
/// Invariant: every field is either a non-empty string or the `"N/A"`
/// sentinel, never null or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLocation {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub isp: String,
}

impl Default for NormalizedLocation {
    fn default() -> Self {
        Self::fallback()
    }
}

impl NormalizedLocation {
    /// The all-unknown record returned when every provider fails.
    pub fn fallback() -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            isp: UNKNOWN.to_string(),
        }
    }

    /// Overlay a provider's fields onto the fallback record. Empty values
    /// are dropped so they resolve to the sentinel instead.
    pub fn from_fields(fields: LocationFields) -> Self {
        fn pick(value: Option<String>) -> String {
            match value {
                Some(v) if !v.is_empty() => v,
                _ => UNKNOWN.to_string(),
            }
        }

        Self {
            ip: pick(fields.ip),
            country: pick(fields.country),
            city: pick(fields.city),
            isp: pick(fields.isp),
        }
    }

    /// Single display string consumed by the front end.
    pub fn summary(&self) -> String {
        format!("IP: {} | {} {} {}", self.ip, self.country, self.city, self.isp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_resolve_to_sentinel() {
        let fields = LocationFields {
            ip: Some("1.2.3.4".to_string()),
            country: Some(String::new()),
            city: None,
            isp: None,
        };
        let location = NormalizedLocation::from_fields(fields);
        assert_eq!(location.ip, "1.2.3.4");
        assert_eq!(location.country, UNKNOWN);
        assert_eq!(location.city, UNKNOWN);
        assert_eq!(location.isp, UNKNOWN);
    }

    #[test]
    fn test_no_fields_is_fallback() {
        assert_eq!(
            NormalizedLocation::from_fields(LocationFields::default()),
            NormalizedLocation::fallback()
        );
    }

    #[test]
    fn test_summary_format() {
        let location = NormalizedLocation {
            ip: "1.2.3.4".to_string(),
            country: "Wonderland".to_string(),
            city: "N/A".to_string(),
            isp: "N/A".to_string(),
        };
        assert_eq!(location.summary(), "IP: 1.2.3.4 | Wonderland N/A N/A");
    }
}
