//! Core store domain types and the static option tables for the store form.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Database identifier for a store.
pub type StoreId = i64;

/// A label and form value pair for a `<select>` or checkbox option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn option(label: &'static str, value: &'static str) -> SelectOption {
    SelectOption { label, value }
}

/// The kind of goods a store sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Food and household goods.
    Groceries,
    /// Beer, wine and spirits.
    Alcohol,
    /// Prepared meals.
    Restaurants,
}

/// Maps each category to the store types that may be chosen for it.
///
/// A store's type must come from the row for its category, so the type
/// selection is cleared whenever the category changes.
pub const CATEGORY_TYPES: [(Category, &[SelectOption]); 3] = [
    (
        Category::Groceries,
        &[
            option("Bakery", "bakery"),
            option("Baking", "baking"),
            option("Chocolate", "chocolate"),
            option("Coffee", "coffee"),
            option("Dairy", "dairy"),
            option("Deli", "deli"),
            option("Desserts", "desserts"),
            option("Fruit", "fruit"),
            option("Ice cream", "ice cream"),
            option("Groceries", "groceries"),
            option("Meat", "meat"),
            option("Produce", "produce"),
            option("Sauces", "sauces"),
            option("Soups", "soups"),
            option("Tea", "tea"),
        ],
    ),
    (
        Category::Alcohol,
        &[
            option("Beer", "beer"),
            option("Cider", "cider"),
            option("Liquor", "liquor"),
            option("Wine", "wine"),
        ],
    ),
    (
        Category::Restaurants,
        &[
            option("Indian", "indian"),
            option("Italian", "italian"),
            option("Thai", "thai"),
        ],
    ),
];

impl Category {
    /// All categories in the order they are offered in the store form.
    pub const ALL: [Category; 3] = [Category::Groceries, Category::Alcohol, Category::Restaurants];

    /// The value used in URLs, forms and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Alcohol => "alcohol",
            Category::Restaurants => "restaurants",
        }
    }

    /// The name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Alcohol => "Alcohol",
            Category::Restaurants => "Restaurants",
        }
    }

    /// The store types that belong to this category.
    pub fn type_options(&self) -> &'static [SelectOption] {
        CATEGORY_TYPES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, types)| *types)
            .unwrap_or_default()
    }

    /// Returns the canonical type value if `store_type` belongs to this category.
    pub fn find_type(&self, store_type: &str) -> Option<&'static str> {
        self.type_options()
            .iter()
            .find(|option| option.value == store_type)
            .map(|option| option.value)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A channel through which customers can place an order with a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Orders are emailed to the store.
    Email,
    /// Orders go through a form on the store's website.
    Form,
    /// Orders are placed in an online shop.
    Online,
    /// Orders are phoned in.
    Phone,
}

impl ContactMethod {
    /// All ordering methods in the order they are offered in the store form.
    pub const ALL: [ContactMethod; 4] = [
        ContactMethod::Email,
        ContactMethod::Form,
        ContactMethod::Online,
        ContactMethod::Phone,
    ];

    /// The value used in forms and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Form => "form",
            ContactMethod::Online => "online",
            ContactMethod::Phone => "phone",
        }
    }

    /// The name shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ContactMethod::Email => "Email",
            ContactMethod::Form => "Form",
            ContactMethod::Online => "Online",
            ContactMethod::Phone => "Phone",
        }
    }

    /// The text shown on a store card for a store's primary ordering method.
    pub fn order_text(&self) -> &'static str {
        match self {
            ContactMethod::Email => "Email orders",
            ContactMethod::Form => "Online form orders",
            ContactMethod::Online => "Online store orders",
            ContactMethod::Phone => "Phone orders",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| Error::InvalidContactMethod(s.to_owned()))
    }
}

impl Display for ContactMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ordering methods a store supports, stored as one flag per method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct MethodFlags {
    pub phone: bool,
    pub online: bool,
    pub form: bool,
    pub email: bool,
}

impl MethodFlags {
    /// Derive the flags from the methods selected in the store form.
    ///
    /// Each flag is set if and only if its method is in `selected`.
    pub fn from_selected(selected: &[ContactMethod]) -> Self {
        Self {
            phone: selected.contains(&ContactMethod::Phone),
            online: selected.contains(&ContactMethod::Online),
            form: selected.contains(&ContactMethod::Form),
            email: selected.contains(&ContactMethod::Email),
        }
    }

    /// Whether `method` is one of the store's ordering methods.
    pub fn contains(&self, method: ContactMethod) -> bool {
        match method {
            ContactMethod::Email => self.email,
            ContactMethod::Form => self.form,
            ContactMethod::Online => self.online,
            ContactMethod::Phone => self.phone,
        }
    }

    /// The set methods, in [ContactMethod::ALL] order.
    pub fn selected(&self) -> Vec<ContactMethod> {
        ContactMethod::ALL
            .into_iter()
            .filter(|method| self.contains(*method))
            .collect()
    }
}

/// The options for the yes/no selects used for delivery and pickup.
pub const YES_NO_OPTIONS: [SelectOption; 2] = [option("Yes", "yes"), option("No", "no")];

/// Parse a yes/no selection. Anything other than "yes" or "no" is treated as no selection.
pub fn parse_yes_no(selection: &str) -> Option<bool> {
    match selection {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// The yes/no selection for `value`, the inverse of [parse_yes_no].
pub fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// A validated, non-empty store name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreName(String);

impl StoreName {
    /// Create a store name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyStoreName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyStoreName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a store name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StoreName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every field of a store that a user can set, i.e. everything except the
/// server-assigned ID and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDetails {
    /// The unique name of the store.
    pub name: StoreName,
    /// The kind of goods the store sells.
    pub category: Category,
    /// One of the values in [Category::type_options] for `category`.
    pub store_type: String,
    /// A short summary of what the store offers.
    pub description: Option<String>,
    /// The store's website.
    pub url: String,
    /// How the store prefers to take orders.
    pub primary_method: ContactMethod,
    /// Every way the store takes orders.
    pub methods: MethodFlags,
    /// The address to email orders to.
    pub email: Option<String>,
    /// The number to phone orders in to.
    pub phone: Option<String>,
    /// Whether the store delivers to homes.
    pub delivery: bool,
    /// Whether orders can be picked up from the store.
    pub pickup: bool,
    /// The URL of the store's logo.
    pub image: Option<String>,
    /// Whether the logo is light on a transparent background and needs a dark backdrop.
    pub inverted_image: bool,
}

/// A local business listed in the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    /// The ID of the store in the database.
    pub id: StoreId,
    /// The user-editable fields.
    pub details: StoreDetails,
    /// When the store was first added.
    pub created_at: OffsetDateTime,
}
