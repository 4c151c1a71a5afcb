use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Profession the user picked before uploading. Steers how the extraction
/// phrases the summary and groups skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerFocus {
    #[default]
    General,
    Developer,
    Creator,
    Data,
    Product,
    Marketing,
    Sales,
    Design,
}

impl CareerFocus {
    pub const ALL: [CareerFocus; 8] = [
        CareerFocus::General,
        CareerFocus::Developer,
        CareerFocus::Data,
        CareerFocus::Product,
        CareerFocus::Marketing,
        CareerFocus::Sales,
        CareerFocus::Design,
        CareerFocus::Creator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerFocus::General => "general",
            CareerFocus::Developer => "developer",
            CareerFocus::Creator => "creator",
            CareerFocus::Data => "data",
            CareerFocus::Product => "product",
            CareerFocus::Marketing => "marketing",
            CareerFocus::Sales => "sales",
            CareerFocus::Design => "design",
        }
    }

    /// Button label shown on the career picker.
    pub fn label(&self) -> &'static str {
        match self {
            CareerFocus::General => "General",
            CareerFocus::Developer => "Software",
            CareerFocus::Creator => "Creator",
            CareerFocus::Data => "Data",
            CareerFocus::Product => "Product",
            CareerFocus::Marketing => "Marketing",
            CareerFocus::Sales => "Sales",
            CareerFocus::Design => "Creative",
        }
    }
}

impl fmt::Display for CareerFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CareerFocus::ALL
            .into_iter()
            .find(|f| f.as_str() == needle)
            .ok_or_else(|| format!("Unknown career focus '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Developer".parse::<CareerFocus>().unwrap(), CareerFocus::Developer);
        assert_eq!(" sales ".parse::<CareerFocus>().unwrap(), CareerFocus::Sales);
        assert!("astronaut".parse::<CareerFocus>().is_err());
    }

    #[test]
    fn test_every_focus_round_trips_through_as_str() {
        for focus in CareerFocus::ALL {
            assert_eq!(focus.as_str().parse::<CareerFocus>().unwrap(), focus);
        }
    }
}
