//! Endpoints that re-render parts of the store form while it is being filled in.

use axum::extract::{Path, Query};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    listing::preview_card,
    store::{
        RequiredField, StoreFormData,
        form_view::{inline_error, type_field},
    },
};

#[derive(Debug, Deserialize)]
pub struct TypeOptionsQuery {
    #[serde(default)]
    pub category: String,
}

/// Render the store type select for the newly selected category.
///
/// The type selection is always cleared since the previous type may not
/// belong to the new category. The category's inline error is updated
/// out-of-band.
pub async fn get_type_options_endpoint(Query(query): Query<TypeOptionsQuery>) -> Markup {
    let category = query.category.trim().parse().ok();

    html! {
        (type_field(category, None, false))
        (inline_error(RequiredField::Category, category.is_none(), true))
    }
}

/// Check a single required field and render its inline error.
pub async fn validate_field_endpoint(
    Path(field): Path<RequiredField>,
    Form(form): Form<StoreFormData>,
) -> Markup {
    inline_error(field, form.is_missing(field), false)
}

/// Render the store card for the values currently in the form.
pub async fn preview_store_endpoint(Form(form): Form<StoreFormData>) -> Markup {
    preview_card(&form)
}


#[cfg(test)]
mod validate_field_tests {
    use axum::extract::Path;
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};

    use crate::store::{RequiredField, StoreFormData, validate::validate_field_endpoint};

    async fn error_text(field: RequiredField, form: StoreFormData) -> String {
        let markup = validate_field_endpoint(Path(field), Form(form)).await;
        let html = Html::parse_fragment(&markup.into_string());
        let selector = Selector::parse(&format!("#{}-error", field.form_key())).unwrap();

        html.select(&selector)
            .next()
            .expect("No inline error element found")
            .text()
            .collect()
    }

    #[tokio::test]
    async fn missing_field_shows_message() {
        let text = error_text(RequiredField::Name, StoreFormData::default()).await;

        assert_eq!(text, "Store name is required");
    }

    #[tokio::test]
    async fn filled_field_clears_message() {
        let form = StoreFormData {
            url: "https://example.com".to_owned(),
            ..Default::default()
        };

        let text = error_text(RequiredField::Url, form).await;

        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn stale_type_is_reported_missing() {
        let form = StoreFormData {
            category: "alcohol".to_owned(),
            type_: "deli".to_owned(),
            ..Default::default()
        };

        let text = error_text(RequiredField::Type, form).await;

        assert_eq!(text, "Type is required");
    }
}
