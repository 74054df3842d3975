use crate::config::UiConfig;
use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(ui: &UiConfig, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · " (ui.title) }
                link rel="stylesheet" href="/static/main.css";
                script src="/static/inspections.js" defer {};
            }
            body {
                header style=(format!("border-top: 4px solid {}", ui.accent_color)) {
                    h3 { (ui.title) }
                    nav {
                        ul {
                            li { a href="/" { "Inspections" } }
                            li { a href="/inspections/new" { "New inspection" } }
                            li { a href="/reports" { "Reports" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
