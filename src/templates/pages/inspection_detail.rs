use crate::config::UiConfig;
use crate::domain::changes::ChangeLogEntry;
use crate::domain::inspection::{Inspection, REQUIRED_FIELDS};
use crate::domain::status::InspectionStatus;
use crate::templates::pages::inspection_form;
use crate::templates::{card, desktop_layout, status_badge};
use maud::{html, Markup};

pub struct DetailVm {
    pub inspection: Inspection,
    /// Err holds the reason the status could not be computed.
    pub status: Result<InspectionStatus, String>,
    pub changes: Vec<ChangeLogEntry>,
}

pub fn inspection_detail_page(ui: &UiConfig, vm: &DetailVm) -> Markup {
    let i = &vm.inspection;
    let title = format!("Inspection #{} ({})", i.id, i.fields.tag);

    desktop_layout(
        ui,
        &title,
        html! {
            main class="container" {
                h1 { (title) }
                p {
                    small {
                        "Created " (i.created_at.format("%Y-%m-%d %H:%M"))
                        " | updated " (i.updated_at.format("%Y-%m-%d %H:%M"))
                    }
                }

                (card("Status", status_block(&vm.status)))

                (card("Record", html! {
                    table {
                        tbody {
                            @for (column, label) in REQUIRED_FIELDS {
                                tr {
                                    th { (label) }
                                    td { (i.fields.value_of(column).unwrap_or_default()) }
                                }
                            }
                            tr { th { "Notes" } td { (i.fields.notes) } }
                            tr {
                                th { "Photo" }
                                td { (i.fields.photo_path.as_deref().unwrap_or("-")) }
                            }
                        }
                    }
                }))

                div style="display: flex; gap: 10px; margin: 1rem 0;" {
                    form action=(format!("/inspections/{}/report", i.id)) method="post" {
                        button type="submit" { "Generate report" }
                    }
                    form action=(format!("/inspections/{}/delete", i.id)) method="post"
                        onsubmit="return confirm('Delete this inspection?')"
                    {
                        button type="submit" { "Delete" }
                    }
                }

                (card("Edit", inspection_form(&format!("/inspections/{}", i.id), &i.fields)))

                (card("Change history", change_table(&vm.changes)))
            }
        },
    )
}

fn status_block(status: &Result<InspectionStatus, String>) -> Markup {
    match status {
        Ok(s) => html! {
            p { (status_badge(s.status, &s.message)) }
            p { "Last inspection: " strong { (s.last_display()) } }
            p { "Next inspection due: " strong { (s.next_due_display()) } }
            @if s.is_overdue {
                p { "Overdue by " (-s.days_until_due) " days." }
            } @else if s.last_inspection_date.is_some() {
                p { (s.days_until_due) " days remaining." }
            }
        },
        Err(reason) => html! {
            p { "Status unavailable: " (reason) }
        },
    }
}

fn change_table(changes: &[ChangeLogEntry]) -> Markup {
    html! {
        @if changes.is_empty() {
            p { "No changes recorded." }
        } @else {
            table {
                thead {
                    tr {
                        th { "When" }
                        th { "Field" }
                        th { "Previous" }
                        th { "New" }
                    }
                }
                tbody {
                    @for c in changes {
                        tr {
                            td { (c.changed_at.format("%Y-%m-%d %H:%M:%S")) }
                            td { (c.field_name) }
                            td { (c.previous_value.as_deref().unwrap_or("")) }
                            td { (c.new_value.as_deref().unwrap_or("")) }
                        }
                    }
                }
            }
        }
    }
}
