use crate::config::UiConfig;
use crate::reports::BatchOutcome;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};
use std::path::Path;

pub fn reports_page(ui: &UiConfig, output_dir: &Path, message: Option<&str>) -> Markup {
    desktop_layout(
        ui,
        "Reports",
        html! {
            main class="container" {
                h1 { "Reports" }
                @if let Some(msg) = message {
                    p class="card" { (msg) }
                }
                p { "Documents are written to " code { (output_dir.display()) } "." }

                (card("Inspection reports", html! {
                    p { "One document per stored inspection. Records that fail are listed afterwards." }
                    form action="/reports/batch" method="post" {
                        button type="submit" { "Generate all reports" }
                    }
                }))

                (card("Summary", html! {
                    p { "Totals by equipment type and platform, plus every inspection with its status." }
                    form action="/reports/summary" method="post" {
                        button type="submit" { "Generate summary" }
                    }
                    p { a href="/reports/summary.xlsx" { "Download as spreadsheet" } }
                }))

                (card("Photos", html! {
                    p { "Remove stored photos that no inspection references." }
                    form action="/photos/cleanup" method="post" {
                        button type="submit" { "Clean up photos" }
                    }
                }))
            }
        },
    )
}

pub fn batch_result_page(ui: &UiConfig, outcome: &BatchOutcome) -> Markup {
    desktop_layout(
        ui,
        "Batch reports",
        html! {
            main class="container" {
                h1 { "Batch reports" }
                p {
                    "Generated " strong { (outcome.succeeded()) } " of " (outcome.total) " reports."
                }
                @if !outcome.generated.is_empty() {
                    ul {
                        @for path in &outcome.generated {
                            li { code { (path.display()) } }
                        }
                    }
                }
                @if !outcome.failures.is_empty() {
                    h2 { "Failed (" (outcome.failed()) ")" }
                    table {
                        thead { tr { th { "Inspection" } th { "Reason" } } }
                        tbody {
                            @for (id, reason) in &outcome.failures {
                                tr {
                                    td { a href=(format!("/inspections/{id}")) { "#" (id) } }
                                    td { (reason) }
                                }
                            }
                        }
                    }
                }
                p { a href="/reports" { "Back to reports" } }
            }
        },
    )
}

pub fn summary_result_page(ui: &UiConfig, path: &Path, records: usize) -> Markup {
    desktop_layout(
        ui,
        "Summary report",
        html! {
            main class="container" {
                h1 { "Summary report" }
                p { "Summary of " (records) " inspections written to " code { (path.display()) } "." }
                p { a href="/reports" { "Back to reports" } }
            }
        },
    )
}
