//! The HTML for the store form shared by the create and edit pages.

use maud::{Markup, html};

use crate::{
    Error, endpoints,
    html::{
        BANNER_ERROR_STYLE, BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_CONTAINER_STYLE,
        FORM_HELP_TEXT_STYLE, FORM_INLINE_ERROR_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        base, loading_spinner,
    },
    listing::preview_card,
    navigation::NavBar,
    store::{
        Category, ContactMethod, RequiredField, StoreFormData, StoreId, ValidationErrors,
        YES_NO_OPTIONS,
    },
};

/// Whether the form adds a new store or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update(StoreId),
}

impl FormAction {
    fn verb(&self) -> &'static str {
        match self {
            FormAction::Create => "add",
            FormAction::Update(_) => "update",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            FormAction::Create => "Add a Store",
            FormAction::Update(_) => "Edit Store",
        }
    }

    pub fn submit_text(&self) -> &'static str {
        match self {
            FormAction::Create => "Add Store",
            FormAction::Update(_) => "Update Store",
        }
    }
}

/// The messages to list in the server error banner for `error`.
///
/// Unexpected SQL errors are shown without the generic wrapper text so that
/// the user sees what the database reported.
pub fn server_error_messages(error: &Error) -> Vec<String> {
    match error {
        Error::SqlError(sql_error) => vec![sql_error.to_string()],
        error => vec![error.to_string()],
    }
}

/// Render the full page around the store form.
///
/// `categories` are the categories linked from the navigation bar.
pub fn store_form_page(
    action: FormAction,
    categories: &[Category],
    form: &StoreFormData,
) -> Markup {
    let active_endpoint = match action {
        FormAction::Create => endpoints::NEW_STORE_VIEW.to_owned(),
        FormAction::Update(store_id) => {
            endpoints::format_endpoint(endpoints::EDIT_STORE_VIEW, store_id)
        }
    };
    let nav_bar = NavBar::new(&active_endpoint, categories).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-xl font-bold self-start" { (action.heading()) }

            (store_form(action, form, None, &[]))
        }
    };

    base(action.heading(), &content)
}

/// Render the store form.
///
/// `errors` flags the missing required fields and adds the summary banner.
/// `server_errors` adds a banner listing why the last submission failed.
pub fn store_form(
    action: FormAction,
    form: &StoreFormData,
    errors: Option<&ValidationErrors>,
    server_errors: &[String],
) -> Markup {
    let is_missing = |field: RequiredField| errors.is_some_and(|errors| errors.contains(field));
    let selected_category = form.selected_category();
    let checked_methods = form.selected_methods();

    let (hx_post, hx_put) = match action {
        FormAction::Create => (Some(endpoints::POST_STORE.to_owned()), None),
        FormAction::Update(store_id) => (
            None,
            Some(endpoints::format_endpoint(endpoints::PUT_STORE, store_id)),
        ),
    };

    html! {
        form
            id="store-form"
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            novalidate
            class="w-full space-y-4 md:space-y-6"
        {
            @if let Some(errors) = errors {
                (validation_banner(action, errors))
            }

            @if !server_errors.is_empty() {
                (server_error_banner(server_errors))
            }

            (blur_validated(RequiredField::Name, "focusout, change", html! {
                label for="name" class=(FORM_LABEL_STYLE) { "Store name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    value=(form.name)
                    placeholder="Store name"
                    required
                    autofocus
                    aria-invalid=[is_missing(RequiredField::Name).then_some("true")]
                    class=(FORM_TEXT_INPUT_STYLE);

                (inline_error(RequiredField::Name, is_missing(RequiredField::Name), false))
            }))

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                textarea
                    id="description"
                    name="description"
                    rows="3"
                    placeholder="What does the store sell?"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.description)
                }
            }

            // The category select re-renders the type select on change, so
            // its own validation only runs when focus leaves it.
            (blur_validated(RequiredField::Category, "focusout", html! {
                label for="category" class=(FORM_LABEL_STYLE) { "Store category" }

                select
                    id="category"
                    name="category"
                    required
                    hx-get=(endpoints::STORE_TYPE_OPTIONS)
                    hx-trigger="change"
                    hx-target="#type-field"
                    hx-swap="outerHTML"
                    hx-indicator="unset"
                    hx-disabled-elt="unset"
                    aria-invalid=[is_missing(RequiredField::Category).then_some("true")]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_category.is_none()] { "Select a category" }

                    @for category in Category::ALL {
                        option
                            value=(category.as_str())
                            selected[selected_category == Some(category)]
                        {
                            (category.label())
                        }
                    }
                }

                (inline_error(RequiredField::Category, is_missing(RequiredField::Category), false))
            }))

            (type_field(selected_category, form.selected_type(), is_missing(RequiredField::Type)))

            (blur_validated(RequiredField::PrimaryMethod, "focusout, change", html! {
                label for="primary_method" class=(FORM_LABEL_STYLE) { "Primary shopping method" }

                select
                    id="primary_method"
                    name="primary_method"
                    required
                    aria-invalid=[is_missing(RequiredField::PrimaryMethod).then_some("true")]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.primary_method.is_empty()]
                    {
                        "Select a shopping method"
                    }

                    @for method in ContactMethod::ALL {
                        option
                            value=(method.as_str())
                            selected[form.primary_method.trim() == method.as_str()]
                        {
                            (method.label())
                        }
                    }
                }

                (inline_error(
                    RequiredField::PrimaryMethod,
                    is_missing(RequiredField::PrimaryMethod),
                    false
                ))
            }))

            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Available shopping methods" }

                div class="flex flex-wrap gap-x-6 gap-y-2"
                {
                    @for method in ContactMethod::ALL {
                        @let id = format!("available_methods-{}", method.as_str());

                        div class="flex items-center gap-x-2"
                        {
                            input
                                id=(id)
                                type="checkbox"
                                name="available_methods"
                                value=(method.as_str())
                                checked[checked_methods.contains(&method)]
                                class=(FORM_CHECKBOX_STYLE);

                            label for=(id) class="text-sm" { (method.label()) }
                        }
                    }
                }
            }

            (yes_no_field(RequiredField::Delivery, &form.delivery, is_missing(RequiredField::Delivery)))

            (yes_no_field(RequiredField::Pickup, &form.pickup, is_missing(RequiredField::Pickup)))

            (blur_validated(RequiredField::Url, "focusout, change", html! {
                label for="url" class=(FORM_LABEL_STYLE) { "Website URL" }

                input
                    id="url"
                    type="url"
                    name="url"
                    value=(form.url)
                    placeholder="https://example.com"
                    required
                    aria-invalid=[is_missing(RequiredField::Url).then_some("true")]
                    class=(FORM_TEXT_INPUT_STYLE);

                (inline_error(RequiredField::Url, is_missing(RequiredField::Url), false))
            }))

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    id="email"
                    type="email"
                    name="email"
                    value=(form.email)
                    placeholder="orders@example.com"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="phone" class=(FORM_LABEL_STYLE) { "Phone" }

                input
                    id="phone"
                    type="tel"
                    name="phone"
                    value=(form.phone)
                    placeholder="613-555-0100"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="image" class=(FORM_LABEL_STYLE) { "Logo image URL" }

                input
                    id="image"
                    type="url"
                    name="image"
                    value=(form.image)
                    placeholder="https://example.com/logo.png"
                    class=(FORM_TEXT_INPUT_STYLE);

                div class="flex items-center gap-x-2 mt-2"
                {
                    input
                        id="inverted_image"
                        type="checkbox"
                        name="inverted_image"
                        value="true"
                        checked[form.inverted_image]
                        class=(FORM_CHECKBOX_STYLE);

                    label for="inverted_image" class="text-sm" { "Show the logo on a dark background" }
                }

                p class=(FORM_HELP_TEXT_STYLE) { "Use this for light coloured logos." }
            }

            (preview_section(form))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                (action.submit_text())
            }
        }
    }
}

/// Render the store type select for `category`.
///
/// The select is disabled until a category is chosen, and only offers the
/// types that belong to the chosen category.
pub fn type_field(
    category: Option<Category>,
    selected_type: Option<&str>,
    show_error: bool,
) -> Markup {
    let field = RequiredField::Type;
    let options = category.map(|category| category.type_options()).unwrap_or_default();

    html! {
        div
            id="type-field"
            hx-post=(endpoints::format_endpoint(endpoints::VALIDATE_STORE_FIELD, field.form_key()))
            hx-trigger="focusout, change"
            hx-target=(format!("#{}-error", field.form_key()))
            hx-swap="outerHTML"
            hx-indicator="unset"
            hx-disabled-elt="unset"
        {
            label for="type_" class=(FORM_LABEL_STYLE) { "Store type" }

            select
                id="type_"
                name="type_"
                required
                disabled[category.is_none()]
                aria-invalid=[show_error.then_some("true")]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected_type.is_none()] { "Select a type" }

                @for type_option in options {
                    option
                        value=(type_option.value)
                        selected[selected_type == Some(type_option.value)]
                    {
                        (type_option.label)
                    }
                }
            }

            (inline_error(field, show_error, false))
        }
    }
}

/// Render the inline error for `field`.
///
/// The element is always rendered so that it can be targeted by validation
/// requests, and is empty unless `show` is set.
pub fn inline_error(field: RequiredField, show: bool, out_of_band: bool) -> Markup {
    html! {
        p
            id=(format!("{}-error", field.form_key()))
            hx-swap-oob=[out_of_band.then_some("true")]
            class=(FORM_INLINE_ERROR_STYLE)
        {
            @if show {
                (field.inline_message())
            }
        }
    }
}

/// Wrap a required field so that it is checked when the user leaves it.
fn blur_validated(field: RequiredField, trigger: &str, content: Markup) -> Markup {
    html! {
        div
            hx-post=(endpoints::format_endpoint(endpoints::VALIDATE_STORE_FIELD, field.form_key()))
            hx-trigger=(trigger)
            hx-target=(format!("#{}-error", field.form_key()))
            hx-swap="outerHTML"
            hx-indicator="unset"
            hx-disabled-elt="unset"
        {
            (content)
        }
    }
}

fn yes_no_field(field: RequiredField, selection: &str, show_error: bool) -> Markup {
    let key = field.form_key();

    html! {
        fieldset aria-invalid=[show_error.then_some("true")]
        {
            legend class=(FORM_LABEL_STYLE) { (field.label()) }

            div class="flex gap-x-6"
            {
                @for choice in YES_NO_OPTIONS {
                    @let id = format!("{key}-{}", choice.value);

                    div class="flex items-center gap-x-2"
                    {
                        input
                            id=(id)
                            type="radio"
                            name=(key)
                            value=(choice.value)
                            required
                            checked[selection.trim() == choice.value]
                            class=(FORM_CHECKBOX_STYLE);

                        label for=(id) class="text-sm" { (choice.label) }
                    }
                }
            }

            (inline_error(field, show_error, false))
        }
    }
}

/// Show the card the store would get with the values entered so far.
///
/// The card is re-rendered whenever a field in the form changes.
fn preview_section(form: &StoreFormData) -> Markup {
    html! {
        section
        {
            h2 class="mb-2 text-lg font-semibold" { "Preview" }

            div
                id="store-preview"
                hx-post=(endpoints::STORE_PREVIEW)
                hx-trigger="change from:closest form"
                hx-include="closest form"
                hx-target="this"
                hx-swap="innerHTML"
                hx-indicator="unset"
                hx-disabled-elt="unset"
            {
                (preview_card(form))
            }
        }
    }
}

fn validation_banner(action: FormAction, errors: &ValidationErrors) -> Markup {
    let labels = errors.labels();

    html! {
        div id="form-errors" role="alert" class=(BANNER_ERROR_STYLE)
        {
            p class="font-medium"
            {
                "To " (action.verb()) " this store, " (labels.len())
                " changes need to be made. Please fill out the following fields:"
            }

            ul class="mt-1.5 list-disc list-inside"
            {
                @for label in labels {
                    li { (label) }
                }
            }
        }
    }
}

fn server_error_banner(messages: &[String]) -> Markup {
    html! {
        div id="server-errors" role="alert" class=(BANNER_ERROR_STYLE)
        {
            p class="font-medium" { "Server error" }

            ul class="mt-1.5 list-disc list-inside"
            {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}
