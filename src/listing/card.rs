//! The card that shows a single store in the listing and in the store form preview.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BADGE_SUCCESS_STYLE, BADGE_WARNING_STYLE, LINK_STYLE, external_link},
    store::{Category, ContactMethod, Store, StoreFormData, StoreId},
};

const CARD_STYLE: &str = "flex flex-col gap-3 p-4 bg-white border border-gray-200 \
    rounded-lg shadow-sm dark:bg-gray-800 dark:border-gray-700";
const LOGO_STYLE: &str = "w-[75px] h-[75px] object-contain object-center rounded";

/// The values a card shows. Saved stores have every field; a preview of an
/// unsaved form may not have a category or primary method yet.
struct CardView<'a> {
    store_id: Option<StoreId>,
    name: &'a str,
    category: Option<Category>,
    store_type: &'a str,
    description: Option<&'a str>,
    url: &'a str,
    primary_method: Option<ContactMethod>,
    phone: Option<&'a str>,
    delivery: bool,
    pickup: bool,
    image: Option<&'a str>,
    inverted_image: bool,
}

pub(super) fn store_card(store: &Store) -> Markup {
    let details = &store.details;

    render_card(CardView {
        store_id: Some(store.id),
        name: details.name.as_ref(),
        category: Some(details.category),
        store_type: &details.store_type,
        description: details.description.as_deref(),
        url: &details.url,
        primary_method: Some(details.primary_method),
        phone: details.phone.as_deref(),
        delivery: details.delivery,
        pickup: details.pickup,
        image: details.image.as_deref(),
        inverted_image: details.inverted_image,
    })
}

/// Render the card for the unsaved values in the store form.
pub(crate) fn preview_card(form: &StoreFormData) -> Markup {
    let non_empty = |text: &str| -> Option<String> {
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    };
    let description = non_empty(&form.description);
    let phone = non_empty(&form.phone);
    let image = non_empty(&form.image);

    render_card(CardView {
        store_id: None,
        name: form.name.trim(),
        category: form.selected_category(),
        store_type: form.selected_type().unwrap_or_default(),
        description: description.as_deref(),
        url: form.url.trim(),
        primary_method: form.primary_method.trim().parse().ok(),
        phone: phone.as_deref(),
        delivery: form.delivery.trim() == "yes",
        pickup: form.pickup.trim() == "yes",
        image: image.as_deref(),
        inverted_image: form.inverted_image,
    })
}

fn render_card(card: CardView<'_>) -> Markup {
    let edit_url = card
        .store_id
        .map(|store_id| endpoints::format_endpoint(endpoints::EDIT_STORE_VIEW, store_id));
    let call_link = match (card.primary_method, card.phone) {
        (Some(ContactMethod::Phone), Some(phone)) => Some(format!("tel:{phone}")),
        _ => None,
    };

    html! {
        article class=(CARD_STYLE) data-store-id=[card.store_id]
        {
            div class="flex items-start gap-4"
            {
                @match card.image {
                    Some(image) => {
                        img
                            src=(image)
                            alt=(format!("{} logo", card.name))
                            class=(LOGO_STYLE)
                            style=(if card.inverted_image {
                                "background-color: black;"
                            } else {
                                "background-color: transparent;"
                            });
                    }
                    None => {
                        div
                            aria-hidden="true"
                            class="w-[75px] h-[75px] shrink-0 rounded bg-gray-200 dark:bg-gray-700"
                        {}
                    }
                }

                div
                {
                    h2 class="text-lg font-semibold" { (card.name) }

                    @if let Some(category) = card.category {
                        p class="text-sm font-semibold" { (category.label()) }
                    }

                    @if !card.store_type.is_empty() {
                        p class="text-sm" { (card.store_type) }
                    }
                }
            }

            @if let Some(description) = card.description {
                p class="text-sm text-gray-700 dark:text-gray-300" { (description) }
            }

            @if let Some(primary_method) = card.primary_method {
                p
                    class="px-3 py-2 text-sm rounded bg-blue-50 text-blue-800
                        dark:bg-gray-700 dark:text-blue-300"
                {
                    (primary_method.order_text())
                }
            }

            div class="flex flex-wrap gap-4 text-sm"
            {
                (availability("Home delivery", card.delivery))
                (availability("Store pickup", card.pickup))
            }

            div class="flex flex-wrap gap-4 text-sm"
            {
                @if !card.url.is_empty() {
                    (external_link(card.url, "Visit site"))
                }

                @if let Some(call_link) = call_link {
                    a href=(call_link) class=(LINK_STYLE) { "Call" }
                }

                @if let Some(edit_url) = edit_url {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                }
            }
        }
    }
}

fn availability(label: &str, available: bool) -> Markup {
    let (style, text) = if available {
        (BADGE_SUCCESS_STYLE, "Yes")
    } else {
        (BADGE_WARNING_STYLE, "No")
    };

    html! {
        span class="flex items-center gap-2"
        {
            (label)
            span class=(style) { (text) }
        }
    }
}
