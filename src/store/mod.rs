//! Store records, their storage and the form for adding and editing them.

mod create;
pub(crate) mod db;
mod domain;
mod edit;
mod form;
mod form_view;
mod validate;

pub use create::{create_store_endpoint, get_new_store_page};
pub use db::{create_store, create_store_table, get_all_stores, get_store, update_store};
pub use domain::{
    CATEGORY_TYPES, Category, ContactMethod, MethodFlags, Store, StoreDetails, StoreId,
    StoreName, YES_NO_OPTIONS, parse_yes_no, yes_no,
};
pub use edit::{get_edit_store_page, update_store_endpoint};
pub use form::{RequiredField, StoreFormData, ValidationErrors};
pub use form_view::{FormAction, store_form, type_field};
pub use validate::{get_type_options_endpoint, preview_store_endpoint, validate_field_endpoint};
