use crate::domain::status::StatusClass;
use maud::{html, Markup};

pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn status_badge(class: StatusClass, label: &str) -> Markup {
    html! {
        span class=(format!("badge badge-{}", class.as_str())) { (label) }
    }
}

/// Labelled `<select>` with a blank first option; `selected` is pre-chosen.
pub fn select_field<S: AsRef<str>>(name: &str, label: &str, options: &[S], selected: &str) -> Markup {
    html! {
        label for=(name) { (label) }
        select name=(name) id=(name) required {
            option value="" selected[selected.is_empty()] { "Select..." }
            @for opt in options {
                option value=(opt.as_ref()) selected[opt.as_ref() == selected] { (opt.as_ref()) }
            }
        }
    }
}
