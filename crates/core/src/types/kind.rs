//! The fixed pizza type classification.

use serde::{Deserialize, Serialize};

/// One of the four fixed catalog type codes.
///
/// The numeric codes are stored in the database (`SMALLINT`) and must stay
/// stable: chicken=0, beef=1, sausage=2, vegetarian=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PizzaKind {
    #[default]
    Chicken,
    Beef,
    Sausage,
    Vegetarian,
}

impl PizzaKind {
    /// All kinds, in code order. Used to render the filter form.
    pub const ALL: [Self; 4] = [Self::Chicken, Self::Beef, Self::Sausage, Self::Vegetarian];

    /// The stable numeric code persisted in the database.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Chicken => 0,
            Self::Beef => 1,
            Self::Sausage => 2,
            Self::Vegetarian => 3,
        }
    }

    /// Decode a stored numeric code.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Chicken),
            1 => Some(Self::Beef),
            2 => Some(Self::Sausage),
            3 => Some(Self::Vegetarian),
            _ => None,
        }
    }

    /// The slug submitted by the catalog filter form.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Chicken => "chicken",
            Self::Beef => "beef",
            Self::Sausage => "sausage",
            Self::Vegetarian => "vegetarian",
        }
    }

    /// Parse a filter-form slug.
    ///
    /// Unrecognized selections return `None`, which callers treat as "no
    /// filter" rather than an error.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "chicken" => Some(Self::Chicken),
            "beef" => Some(Self::Beef),
            "sausage" => Some(Self::Sausage),
            "vegetarian" => Some(Self::Vegetarian),
            _ => None,
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chicken => "Chicken",
            Self::Beef => "Beef",
            Self::Sausage => "Sausage",
            Self::Vegetarian => "Vegetarian",
        }
    }
}

impl std::fmt::Display for PizzaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PizzaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| format!("invalid pizza kind: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(PizzaKind::Chicken.code(), 0);
        assert_eq!(PizzaKind::Beef.code(), 1);
        assert_eq!(PizzaKind::Sausage.code(), 2);
        assert_eq!(PizzaKind::Vegetarian.code(), 3);
    }

    #[test]
    fn test_code_roundtrip() {
        for kind in PizzaKind::ALL {
            assert_eq!(PizzaKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(PizzaKind::from_code(4), None);
        assert_eq!(PizzaKind::from_code(-1), None);
    }

    #[test]
    fn test_vegetarian_slug_maps_to_code_3() {
        let kind = PizzaKind::from_slug("vegetarian").expect("known slug");
        assert_eq!(kind.code(), 3);
    }

    #[test]
    fn test_unrecognized_slug_is_none() {
        assert_eq!(PizzaKind::from_slug("hawaiian"), None);
        assert_eq!(PizzaKind::from_slug(""), None);
    }
}
