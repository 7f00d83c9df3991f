use serde::{Deserialize, Serialize};
use validator::Validate;

/// Search form submitted by the directory page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default, alias = "postalCode")]
    #[validate(length(max = 10))]
    pub zip: String,
    #[serde(default = "default_radius", rename = "radiusMiles", alias = "radius_miles")]
    #[validate(range(min = 1, max = 500))]
    pub radius_miles: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default, rename = "acceptingOnly", alias = "accepting_only")]
    pub accepting_only: bool,
}

fn default_radius() -> u32 {
    10
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            specialties: Vec::new(),
            zip: String::new(),
            radius_miles: default_radius(),
            gender: String::new(),
            accepting_only: false,
        }
    }
}

impl SearchRequest {
    /// Postal code with surrounding whitespace removed, if one was entered
    pub fn postal_code(&self) -> Option<&str> {
        let zip = self.zip.trim();
        if zip.is_empty() {
            None
        } else {
            Some(zip)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_body() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.radius_miles, 10);
        assert!(req.specialties.is_empty());
        assert!(!req.accepting_only);
        assert!(req.postal_code().is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_radius_out_of_range_rejected() {
        let req: SearchRequest = serde_json::from_str(r#"{"radiusMiles": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_postal_code_trimmed() {
        let req = SearchRequest {
            zip: " 02903 ".to_string(),
            ..Default::default()
        };
        assert_eq!(req.postal_code(), Some("02903"));
    }
}
