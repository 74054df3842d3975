use chrono::NaiveDateTime;
use maud::{html, Markup, DOCTYPE};

const DOCUMENT_CSS: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; max-width: 820px; margin: 2cm auto; color: #111; }
h1 { text-align: center; color: #00008b; font-size: 1.6rem; margin-bottom: 2rem; }
h2 { color: #006400; font-size: 1.2rem; margin-top: 2rem; }
h3 { font-size: 1rem; margin-top: 1.2rem; }
table { border-collapse: collapse; width: 100%; }
th { background: #808080; color: #f5f5f5; text-align: left; padding: 6px 8px 10px; }
td { background: #f5f5dc; padding: 4px 8px; }
th, td { border: 1px solid #000; }
img.inspection-photo { width: 6cm; height: 4cm; object-fit: cover; }
.small { font-size: 0.75rem; }
footer { margin-top: 3rem; border-top: 1px solid #999; padding-top: 0.5rem; }
"#;

/// Standalone printable page; every generated report shares it.
pub fn report_document(title: &str, generated_at: NaiveDateTime, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (maud::PreEscaped(DOCUMENT_CSS)) }
            }
            body {
                h1 { (title) }
                (content)
                (footer(generated_at))
            }
        }
    }
}

/// Two-column field/value table with a header row.
pub fn field_table(header: (&str, &str), rows: &[(&str, String)]) -> Markup {
    html! {
        table {
            thead {
                tr { th { (header.0) } th { (header.1) } }
            }
            tbody {
                @for (label, value) in rows {
                    tr { td { (label) } td { (value) } }
                }
            }
        }
    }
}

fn footer(generated_at: NaiveDateTime) -> Markup {
    html! {
        footer {
            p class="small" {
                "Report generated on " (generated_at.format("%d/%m/%Y at %H:%M:%S"))
            }
            p class="small" { "Equipment Inspection System" }
        }
    }
}
