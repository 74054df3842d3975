use crate::config::UiConfig;
use crate::domain::inspection::Inspection;
use crate::domain::status::StatusClass;
use crate::templates::{desktop_layout, status_badge};
use maud::{html, Markup};

pub struct InspectionRow {
    pub inspection: Inspection,
    pub status_class: StatusClass,
    pub status_message: String,
    /// e.g. "12 days ago"; empty when the date cannot be read.
    pub inspected: String,
}

pub struct InspectionListVm {
    pub rows: Vec<InspectionRow>,
    pub equipment_types: Vec<&'static str>,
    pub equipment_type: String,
    pub start: String,
    pub end: String,
}

pub fn inspections_page(ui: &UiConfig, vm: &InspectionListVm) -> Markup {
    desktop_layout(
        ui,
        "Inspections",
        html! {
            main class="container" {
                h1 { "Inspections" }

                section class="card" {
                    form action="/" method="get" style="display: flex; gap: 10px; align-items: center;" {
                        select name="equipment_type" {
                            option value="" selected[vm.equipment_type.is_empty()] { "All equipment" }
                            @for t in &vm.equipment_types {
                                option value=(t) selected[vm.equipment_type == *t] { (t) }
                            }
                        }
                        label { "From " input type="date" name="start" value=(vm.start); }
                        label { "to " input type="date" name="end" value=(vm.end); }
                        button type="submit" { "Filter" }
                        a href="/" { "Reset" }
                    }
                }

                @if vm.rows.is_empty() {
                    p { "No inspections found." }
                } @else {
                    p { "Found " strong { (vm.rows.len()) } " inspections." }
                    table {
                        thead {
                            tr {
                                th { "ID" }
                                th { "Tag" }
                                th { "Type" }
                                th { "Platform" }
                                th { "Inspection date" }
                                th { "Last inspection" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            @for row in &vm.rows {
                                @let f = &row.inspection.fields;
                                tr {
                                    td { a href=(format!("/inspections/{}", row.inspection.id)) { (row.inspection.id) } }
                                    td { (f.tag) }
                                    td { (f.equipment_type) }
                                    td { (f.platform) }
                                    td { (f.inspection_date) " " small { (row.inspected) } }
                                    td { (f.last_inspection_date) }
                                    td { (status_badge(row.status_class, &row.status_message)) }
                                }
                            }
                        }
                    }
                }

                form action="/inspections/clear" method="post"
                    onsubmit="return confirm('Delete every inspection, its history and all photos?')"
                    style="margin-top: 2rem;"
                {
                    button type="submit" { "Clear all inspections" }
                }
            }
        },
    )
}
