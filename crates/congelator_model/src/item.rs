//! Inventory items and their fixed vocabularies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Age in days beyond which an item is flagged as expired.
pub const FRESHNESS_HORIZON_DAYS: u64 = 180;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Opaque unique identifier of an item.
///
/// New ids are v4 UUIDs. Ids read from older documents (e.g. `"1"`) are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, never-reused id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Error returned when parsing a category or location name fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Food category stored on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Meat.
    #[serde(rename = "Viande")]
    Meat,
    /// Fish.
    #[serde(rename = "Poisson")]
    Fish,
    /// Vegetables.
    #[serde(rename = "Légumes")]
    Vegetables,
    /// Cooked dishes.
    #[serde(rename = "Plat")]
    Dish,
    /// Sauces.
    #[serde(rename = "Sauce")]
    Sauce,
    /// Herbs and aromatics.
    #[serde(rename = "Aromatiques")]
    Herbs,
}

impl Category {
    /// All storable categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Meat,
        Category::Fish,
        Category::Vegetables,
        Category::Dish,
        Category::Sauce,
        Category::Herbs,
    ];

    /// Returns the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meat => "Viande",
            Category::Fish => "Poisson",
            Category::Vegetables => "Légumes",
            Category::Dish => "Plat",
            Category::Sauce => "Sauce",
            Category::Herbs => "Aromatiques",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Category::Meat => "meat",
            Category::Fish => "fish",
            Category::Vegetables => "vegetables",
            Category::Dish => "dish",
            Category::Sauce => "sauce",
            Category::Herbs => "herbs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    /// Accepts the wire name or the English alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(needle) || c.alias().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Category filter token used when listing items.
///
/// `All` exists only here; it is never stored on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// A single category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if the item's category passes the filter.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// Physical storage location in the freezer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    /// Top drawer.
    #[serde(rename = "Tiroir Haut")]
    TopDrawer,
    /// Middle drawer.
    #[serde(rename = "Tiroir du Milieu")]
    MiddleDrawer,
    /// Bottom drawer.
    #[serde(rename = "Tiroir Bas")]
    BottomDrawer,
    /// Freezer compartment.
    #[serde(rename = "Freezer")]
    Freezer,
}

impl Location {
    /// All storage locations, top to bottom.
    pub const ALL: [Location; 4] = [
        Location::TopDrawer,
        Location::MiddleDrawer,
        Location::BottomDrawer,
        Location::Freezer,
    ];

    /// Returns the wire name of the location.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::TopDrawer => "Tiroir Haut",
            Location::MiddleDrawer => "Tiroir du Milieu",
            Location::BottomDrawer => "Tiroir Bas",
            Location::Freezer => "Freezer",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Location::TopDrawer => "top",
            Location::MiddleDrawer => "middle",
            Location::BottomDrawer => "bottom",
            Location::Freezer => "freezer",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = UnknownVariant;

    /// Accepts the wire name or a short alias (`top`, `middle`, `bottom`,
    /// `freezer`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Location::ALL
            .into_iter()
            .find(|l| {
                l.as_str().eq_ignore_ascii_case(needle) || l.alias().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownVariant {
                kind: "location",
                value: s.to_string(),
            })
    }
}

/// One physical food unit in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique id, immutable.
    pub id: ItemId,
    /// Free-text label.
    pub name: String,
    /// Food category.
    pub category: Category,
    /// Storage location.
    pub location: Location,
    /// Creation time, immutable.
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
}

impl Item {
    /// Creates a new item with a fresh id, added at `now`.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        location: Location,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            category,
            location,
            date_added: now,
        }
    }

    /// Age in whole days, rounded up.
    pub fn age_days(&self, now: DateTime<Utc>) -> u64 {
        let millis = (now - self.date_added).num_milliseconds().unsigned_abs();
        millis.div_ceil(MILLIS_PER_DAY as u64)
    }

    /// Returns true once the item is past the freshness horizon.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age_days(now) > FRESHNESS_HORIZON_DAYS
    }

    /// The moment the item crosses the freshness horizon.
    pub fn expires_on(&self) -> DateTime<Utc> {
        self.date_added + Duration::days(FRESHNESS_HORIZON_DAYS as i64)
    }
}
