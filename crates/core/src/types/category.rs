//! Grocery item category enumeration.

use serde::{Deserialize, Serialize};

/// Category of a grocery item.
///
/// This is a closed set: the stored column value, the form select options,
/// and the display labels are all derived from this enum so the list is
/// defined exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Produce,
    Deli,
    Bakery,
    Pantry,
    Frozen,
    #[default]
    Other,
}

impl ItemCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Produce,
        Self::Deli,
        Self::Bakery,
        Self::Pantry,
        Self::Frozen,
        Self::Other,
    ];

    /// The stored/submitted value for this category.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Produce => "produce",
            Self::Deli => "deli",
            Self::Bakery => "bakery",
            Self::Pantry => "pantry",
            Self::Frozen => "frozen",
            Self::Other => "other",
        }
    }

    /// Human-readable label: the title-cased name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Deli => "Deli",
            Self::Bakery => "Bakery",
            Self::Pantry => "Pantry",
            Self::Frozen => "Frozen",
            Self::Other => "Other",
        }
    }

    /// Ordered `(value, label)` pairs for populating a select input.
    #[must_use]
    pub fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|c| (c.value(), c.label())).collect()
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.value() == s)
            .ok_or_else(|| format!("invalid item category: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_order_and_labels() {
        let choices = ItemCategory::choices();
        assert_eq!(
            choices,
            vec![
                ("produce", "Produce"),
                ("deli", "Deli"),
                ("bakery", "Bakery"),
                ("pantry", "Pantry"),
                ("frozen", "Frozen"),
                ("other", "Other"),
            ]
        );
    }

    #[test]
    fn test_from_str_roundtrip() {
        for category in ItemCategory::ALL {
            let parsed: ItemCategory = category.value().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_values() {
        assert!("seafood".parse::<ItemCategory>().is_err());
        assert!("".parse::<ItemCategory>().is_err());
        // Labels are for display, not for parsing
        assert!("Produce".parse::<ItemCategory>().is_err());
    }

    #[test]
    fn test_default_is_other() {
        assert_eq!(ItemCategory::default(), ItemCategory::Other);
    }

    #[test]
    fn test_display_matches_value() {
        assert_eq!(ItemCategory::Frozen.to_string(), "frozen");
    }

    #[test]
    fn test_serde_uses_snake_case_value() {
        let json = serde_json::to_string(&ItemCategory::Deli).unwrap();
        assert_eq!(json, "\"deli\"");
        let parsed: ItemCategory = serde_json::from_str("\"bakery\"").unwrap();
        assert_eq!(parsed, ItemCategory::Bakery);
    }
}
