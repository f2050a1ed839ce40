//! Closed set of club categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Category a club is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubCategory {
    Photography,
    Sports,
    Tech,
    Arts,
    Music,
    Books,
    Travel,
    Food,
    Fitness,
    Other,
}

impl ClubCategory {
    pub const ALL: [ClubCategory; 10] = [
        ClubCategory::Photography,
        ClubCategory::Sports,
        ClubCategory::Tech,
        ClubCategory::Arts,
        ClubCategory::Music,
        ClubCategory::Books,
        ClubCategory::Travel,
        ClubCategory::Food,
        ClubCategory::Fitness,
        ClubCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClubCategory::Photography => "Photography",
            ClubCategory::Sports => "Sports",
            ClubCategory::Tech => "Tech",
            ClubCategory::Arts => "Arts",
            ClubCategory::Music => "Music",
            ClubCategory::Books => "Books",
            ClubCategory::Travel => "Travel",
            ClubCategory::Food => "Food",
            ClubCategory::Fitness => "Fitness",
            ClubCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ClubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClubCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClubCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("category", format!("unknown category '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_parses_from_its_own_name() {
        for category in ClubCategory::ALL {
            assert_eq!(category.as_str().parse::<ClubCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_names_are_case_sensitive() {
        assert!("tech".parse::<ClubCategory>().is_err());
        assert!("Cooking".parse::<ClubCategory>().is_err());
    }

    #[test]
    fn serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&ClubCategory::Fitness).unwrap(), "\"Fitness\"");
    }
}
