//! The store listing: every store sorted by name, plus one view per category
//! that appears in the listing.

mod cache;
mod card;
mod page;

pub use cache::ListingCache;
pub(crate) use card::preview_card;
pub use page::{get_all_stores_page, get_category_page};

use crate::store::{Category, Store};

/// Every store sorted by name and the categories that have at least one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreListing {
    stores: Vec<Store>,
    categories: Vec<Category>,
}

impl StoreListing {
    /// Sort `stores` by name and collect their categories.
    ///
    /// Names are compared byte by byte, so the order is case-sensitive, and
    /// stores with the same name keep their relative order. Categories are
    /// listed in the order they first appear in the sorted stores.
    pub fn new(mut stores: Vec<Store>) -> Self {
        stores.sort_by(|a, b| a.details.name.as_ref().cmp(b.details.name.as_ref()));

        let mut categories = Vec::new();

        for store in &stores {
            if !categories.contains(&store.details.category) {
                categories.push(store.details.category);
            }
        }

        Self { stores, categories }
    }

    pub fn all(&self) -> &[Store] {
        &self.stores
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The stores in `category`, in name order.
    ///
    /// Returns `None` if no store in the listing has that category.
    pub fn by_category(&self, category: Category) -> Option<Vec<&Store>> {
        if !self.categories.contains(&category) {
            return None;
        }

        Some(
            self.stores
                .iter()
                .filter(|store| store.details.category == category)
                .collect(),
        )
    }
}
