//! # Menu Catalog
//!
//! Static reference data: the fixed list of sellable items with prices,
//! grouped by category. The engine reads the catalog but never mutates it.
//!
//! ## Reverse Index
//! Category breakdowns in the metrics need `name → category` lookups for
//! every sold line item. Instead of scanning the catalog per lookup, the
//! index is built once at construction (a `HashMap` keyed by item name).
//! Names not present in the catalog resolve to [`MenuCategory::Other`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Menu Category
// =============================================================================

/// Category a menu item belongs to.
///
/// `Other` is the bucket for sold items whose name no longer matches the
/// catalog (e.g. a renamed product on an old closed order).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    /// Espetinhos - grilled skewers, the house specialty.
    Skewers,
    /// Kaftas.
    Kaftas,
    /// Soft drinks, juices and water.
    Drinks,
    /// Beers.
    Beers,
    /// Extras (sauces, farofa).
    Extras,
    /// Fallback bucket for names not in the catalog.
    Other,
}

impl MenuCategory {
    /// Stable string form, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Skewers => "skewers",
            MenuCategory::Kaftas => "kaftas",
            MenuCategory::Drinks => "drinks",
            MenuCategory::Beers => "beers",
            MenuCategory::Extras => "extras",
            MenuCategory::Other => "other",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A sellable item: name and current list price.
/// Immutable reference data; the name is the natural key system-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price_cents: i64,
}

// =============================================================================
// Catalog
// =============================================================================

/// The food stand's menu, in display order, plus the reverse index.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<(MenuCategory, Vec<MenuItem>)>,
    index: HashMap<String, (MenuCategory, i64)>,
}

impl Catalog {
    /// Builds a catalog from category sections, constructing the
    /// name → category reverse index once.
    pub fn new(sections: Vec<(MenuCategory, Vec<MenuItem>)>) -> Self {
        let mut index = HashMap::new();
        for (category, items) in &sections {
            for item in items {
                index.insert(item.name.clone(), (*category, item.price_cents));
            }
        }
        Catalog { sections, index }
    }

    /// The real food-stand menu.
    pub fn food_stand() -> Self {
        fn section(category: MenuCategory, items: &[(&str, i64)]) -> (MenuCategory, Vec<MenuItem>) {
            (
                category,
                items
                    .iter()
                    .map(|(name, price_cents)| MenuItem {
                        name: (*name).to_string(),
                        price_cents: *price_cents,
                    })
                    .collect(),
            )
        }

        Catalog::new(vec![
            section(
                MenuCategory::Skewers,
                &[
                    ("Carne", 1100),
                    ("Costela", 1100),
                    ("Frango com bacon", 1100),
                    ("Frango", 1000),
                    ("Panceta", 1000),
                    ("Coração", 1000),
                    ("Linguiça Perdigão na brasa", 1000),
                    ("Queijo coalho", 800),
                    ("Pão de alho", 800),
                ],
            ),
            section(
                MenuCategory::Kaftas,
                &[("Kafta de costela", 1400), ("Kafta de pernil", 1400)],
            ),
            section(
                MenuCategory::Drinks,
                &[
                    ("Suco Bellas Frutas", 1000),
                    ("Coca-Cola 350ml", 600),
                    ("Coca-Cola Zero 350ml", 600),
                    ("Fanta Laranja 350ml", 600),
                    ("Fanta Uva 350ml", 600),
                    ("Água com gás", 450),
                    ("Água", 350),
                ],
            ),
            section(
                MenuCategory::Beers,
                &[
                    ("Heineken 330ml", 1100),
                    ("Skol 350ml", 600),
                    ("Brahma 350ml", 600),
                ],
            ),
            section(
                MenuCategory::Extras,
                &[("Molho de alho", 200), ("Farofa", 100)],
            ),
        ])
    }

    /// Resolves an item name to its category, `Other` when unmatched.
    pub fn category_of(&self, name: &str) -> MenuCategory {
        self.index
            .get(name)
            .map(|(category, _)| *category)
            .unwrap_or(MenuCategory::Other)
    }

    /// Current list price for an item name, if it is on the menu.
    pub fn price_of(&self, name: &str) -> Option<i64> {
        self.index.get(name).map(|(_, price)| *price)
    }

    /// Category sections in display order.
    pub fn sections(&self) -> &[(MenuCategory, Vec<MenuItem>)] {
        &self.sections
    }

    /// Iterates every item on the menu.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections.iter().flat_map(|(_, items)| items.iter())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::food_stand()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
