//! The fixed category table used to classify transactions.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Classifies transactions for the per-category resume screen.
///
/// The table is static configuration: loaded once per process, immutable,
/// and iterated in declaration order wherever category order matters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category {
            key: "purchases",
            name: "Compras",
            color: "#5636D3",
            icon: "shopping-bag",
        },
        Category {
            key: "food",
            name: "Alimentação",
            color: "#FF872C",
            icon: "coffee",
        },
        Category {
            key: "salary",
            name: "Salário",
            color: "#12A454",
            icon: "dollar-sign",
        },
        Category {
            key: "car",
            name: "Carro",
            color: "#E83F5B",
            icon: "crosshair",
        },
        Category {
            key: "leisure",
            name: "Lazer",
            color: "#26195C",
            icon: "heart",
        },
        Category {
            key: "studies",
            name: "Estudos",
            color: "#9C001A",
            icon: "book",
        },
    ]
});

/// Returns the full category table in display order.
pub fn table() -> &'static [Category] {
    CATEGORIES.as_slice()
}

/// Looks up a category by its stable key.
pub fn find(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.key == key)
}
