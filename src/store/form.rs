//! Field derivation and validation for the store create and edit forms.
//!
//! The form is submitted as raw strings so that whatever the user entered can
//! be rendered back to them. [StoreFormData::validate] turns the raw values
//! into [StoreDetails] or reports which required fields are missing.

use serde::{Deserialize, Serialize};

use crate::store::{
    Category, ContactMethod, MethodFlags, Store, StoreDetails, StoreName, parse_yes_no, yes_no,
};

/// The raw values of the store form.
///
/// Every field defaults to empty so that a partially filled form still
/// deserializes and can be validated field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreFormData {
    pub name: String,
    pub description: String,
    pub category: String,
    pub type_: String,
    pub primary_method: String,
    /// The values of the checked "available shopping methods" checkboxes.
    pub available_methods: Vec<String>,
    /// "yes", "no" or empty if nothing was selected.
    pub delivery: String,
    /// "yes", "no" or empty if nothing was selected.
    pub pickup: String,
    pub url: String,
    pub email: String,
    pub phone: String,
    pub image: String,
    pub inverted_image: bool,
}

/// A form field that must be filled in before a store can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Category,
    #[serde(rename = "type_")]
    Type,
    PrimaryMethod,
    Delivery,
    Pickup,
    Url,
}

impl RequiredField {
    /// The required fields in the order they are reported to the user.
    pub const ALL: [RequiredField; 7] = [
        RequiredField::Name,
        RequiredField::Category,
        RequiredField::Type,
        RequiredField::PrimaryMethod,
        RequiredField::Delivery,
        RequiredField::Pickup,
        RequiredField::Url,
    ];

    /// The `name` of the form input for this field.
    pub fn form_key(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Category => "category",
            RequiredField::Type => "type_",
            RequiredField::PrimaryMethod => "primary_method",
            RequiredField::Delivery => "delivery",
            RequiredField::Pickup => "pickup",
            RequiredField::Url => "url",
        }
    }

    /// The name of the field shown in the list of missing fields.
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Name => "Store name",
            RequiredField::Category => "Store category",
            RequiredField::Type => "Store type",
            RequiredField::PrimaryMethod => "Primary shopping method",
            RequiredField::Delivery => "Home delivery",
            RequiredField::Pickup => "Curbside pickup",
            RequiredField::Url => "Website URL",
        }
    }

    /// The message shown next to the input when the field is missing.
    pub fn inline_message(&self) -> &'static str {
        match self {
            RequiredField::Name => "Store name is required",
            RequiredField::Category => "Category is required",
            RequiredField::Type => "Type is required",
            RequiredField::PrimaryMethod => "Primary shopping method is required",
            RequiredField::Delivery => "Delivery availability required",
            RequiredField::Pickup => "Pickup availability required",
            RequiredField::Url => "Website URL required",
        }
    }

    /// Whether the field is checked as soon as the user leaves it, rather
    /// than only when the form is submitted.
    pub fn validates_on_blur(&self) -> bool {
        !matches!(self, RequiredField::Delivery | RequiredField::Pickup)
    }
}

/// The required fields that were missing when the form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    missing: Vec<RequiredField>,
}

impl ValidationErrors {
    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }

    pub fn contains(&self, field: RequiredField) -> bool {
        self.missing.contains(&field)
    }

    /// The labels of the missing fields, in [RequiredField::ALL] order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.missing.iter().map(RequiredField::label).collect()
    }
}

/// The required fields parsed from their raw form values. A field is `None`
/// if it is missing.
struct RequiredValues {
    name: Option<StoreName>,
    category: Option<Category>,
    store_type: Option<&'static str>,
    /// Whether anything was entered for the type, valid or not.
    type_entered: bool,
    primary_method: Option<ContactMethod>,
    delivery: Option<bool>,
    pickup: Option<bool>,
    url: Option<String>,
}

impl RequiredValues {
    fn is_missing(&self, field: RequiredField) -> bool {
        match field {
            RequiredField::Name => self.name.is_none(),
            RequiredField::Category => self.category.is_none(),
            // A type can only be out of place once there is a category to check it against.
            RequiredField::Type => {
                self.store_type.is_none() && (self.category.is_some() || !self.type_entered)
            }
            RequiredField::PrimaryMethod => self.primary_method.is_none(),
            RequiredField::Delivery => self.delivery.is_none(),
            RequiredField::Pickup => self.pickup.is_none(),
            RequiredField::Url => self.url.is_none(),
        }
    }
}

impl StoreFormData {
    /// Populate the form from an existing store for editing.
    pub fn from_store(store: &Store) -> Self {
        let details = &store.details;

        Self {
            name: details.name.to_string(),
            description: details.description.clone().unwrap_or_default(),
            category: details.category.as_str().to_owned(),
            type_: details.store_type.clone(),
            primary_method: details.primary_method.as_str().to_owned(),
            available_methods: details
                .methods
                .selected()
                .into_iter()
                .map(|method| method.as_str().to_owned())
                .collect(),
            delivery: yes_no(details.delivery).to_owned(),
            pickup: yes_no(details.pickup).to_owned(),
            url: details.url.clone(),
            email: details.email.clone().unwrap_or_default(),
            phone: details.phone.clone().unwrap_or_default(),
            image: details.image.clone().unwrap_or_default(),
            inverted_image: details.inverted_image,
        }
    }

    /// The selected category, if it is one of the known categories.
    pub fn selected_category(&self) -> Option<Category> {
        self.category.trim().parse().ok()
    }

    /// The selected store type, or `None` if it is empty or does not belong
    /// to the selected category.
    pub fn selected_type(&self) -> Option<&'static str> {
        self.selected_category()
            .and_then(|category| category.find_type(self.type_.trim()))
    }

    /// The checked ordering methods. Unknown values are ignored.
    pub fn selected_methods(&self) -> Vec<ContactMethod> {
        self.available_methods
            .iter()
            .filter_map(|value| value.trim().parse().ok())
            .collect()
    }

    /// Check a single required field.
    pub fn is_missing(&self, field: RequiredField) -> bool {
        self.required_values().is_missing(field)
    }

    /// Check that every required field is present and build the store details.
    ///
    /// The ordering method flags are derived from the checkboxes as they are
    /// at the time of the call.
    ///
    /// # Errors
    ///
    /// Returns the missing fields, in [RequiredField::ALL] order, if any
    /// required field is missing.
    pub fn validate(&self) -> Result<StoreDetails, ValidationErrors> {
        let values = self.required_values();
        let missing: Vec<RequiredField> = RequiredField::ALL
            .into_iter()
            .filter(|field| values.is_missing(*field))
            .collect();

        match values {
            RequiredValues {
                name: Some(name),
                category: Some(category),
                store_type: Some(store_type),
                primary_method: Some(primary_method),
                type_entered: _,
                delivery: Some(delivery),
                pickup: Some(pickup),
                url: Some(url),
            } => Ok(StoreDetails {
                name,
                category,
                store_type: store_type.to_owned(),
                description: optional_text(&self.description),
                url,
                primary_method,
                methods: MethodFlags::from_selected(&self.selected_methods()),
                email: optional_text(&self.email),
                phone: optional_text(&self.phone),
                delivery,
                pickup,
                image: optional_text(&self.image),
                inverted_image: self.inverted_image,
            }),
            _ => Err(ValidationErrors { missing }),
        }
    }

    fn required_values(&self) -> RequiredValues {
        let url = self.url.trim();

        RequiredValues {
            name: StoreName::new(&self.name).ok(),
            category: self.selected_category(),
            store_type: self.selected_type(),
            type_entered: !self.type_.trim().is_empty(),
            primary_method: self.primary_method.trim().parse().ok(),
            delivery: parse_yes_no(self.delivery.trim()),
            pickup: parse_yes_no(self.pickup.trim()),
            url: (!url.is_empty()).then(|| url.to_owned()),
        }
    }
}

fn optional_text(text: &str) -> Option<String> {
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_owned())
}



#[cfg(test)]
mod deserialize_tests {
    use crate::store::StoreFormData;

    #[test]
    fn repeated_checkbox_values_become_a_list() {
        let body = "name=Joe%27s+Deli&category=groceries&type_=deli&primary_method=phone\
            &available_methods=phone&available_methods=email&delivery=yes&pickup=no\
            &url=https%3A%2F%2Fexample.com";

        let form: StoreFormData = serde_html_form::from_str(body).expect("could not parse form");

        assert_eq!(form.name, "Joe's Deli");
        assert_eq!(form.available_methods, ["phone", "email"]);
        assert!(!form.inverted_image);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn checked_inverted_image_is_true() {
        let form: StoreFormData =
            serde_html_form::from_str("inverted_image=true").expect("could not parse form");

        assert!(form.inverted_image);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let form: StoreFormData = serde_html_form::from_str("").expect("could not parse form");

        assert_eq!(form, StoreFormData::default());
    }
}
