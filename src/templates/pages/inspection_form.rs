use crate::config::UiConfig;
use crate::domain::inspection::InspectionFields;
use crate::domain::options::{
    equipment_type_names, tags_for, CAUSES, DAMAGE_CATEGORIES, DAMAGE_TYPES, DEFECTS, MODULES,
    PLATFORMS, RECOMMENDATIONS, SECTORS,
};
use crate::templates::components::select_field;
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Entry form. `action` is `/inspections` for a new record and
/// `/inspections/{id}` when editing.
pub fn inspection_form_page(
    ui: &UiConfig,
    title: &str,
    action: &str,
    fields: &InspectionFields,
) -> Markup {
    desktop_layout(
        ui,
        title,
        html! {
            main class="container" {
                h1 { (title) }
                (inspection_form(action, fields))
            }
        },
    )
}

pub fn inspection_form(action: &str, fields: &InspectionFields) -> Markup {
    html! {
        form class="grid" action=(action) method="post" {
            (select_field("platform", "Platform", PLATFORMS, &fields.platform))
            (select_field("module", "Module", MODULES, &fields.module))
            (select_field("sector", "Sector", SECTORS, &fields.sector))

            label for="equipment_type" { "Equipment type" }
            select
                name="equipment_type"
                id="equipment_type"
                required
                data-options-url="/tags"
                data-options-target="#tag"
            {
                option value="" selected[fields.equipment_type.is_empty()] { "Select..." }
                @for t in equipment_type_names() {
                    option value=(t) selected[fields.equipment_type == t] { (t) }
                }
            }

            label for="tag" { "Tag" }
            select name="tag" id="tag" required {
                (tag_options(&fields.equipment_type, &fields.tag))
            }

            (select_field("defect", "Defect", DEFECTS, &fields.defect))
            (select_field("cause", "Cause", CAUSES, &fields.cause))
            (select_field("damage_category", "Damage category", DAMAGE_CATEGORIES, &fields.damage_category))
            (select_field("recommendation", "Recommendation", RECOMMENDATIONS, &fields.recommendation))

            label for="last_inspection_date" { "Last inspection" }
            input type="date" name="last_inspection_date" id="last_inspection_date"
                value=(fields.last_inspection_date) required;

            label for="inspection_date" { "Inspection date" }
            input type="date" name="inspection_date" id="inspection_date"
                value=(fields.inspection_date) required;

            (select_field("damage_type", "Damage type", DAMAGE_TYPES, &fields.damage_type))

            label for="notes" { "Notes" }
            textarea name="notes" id="notes" rows="4" { (fields.notes) }

            label for="photo_path" { "Photo file" }
            input type="text" name="photo_path" id="photo_path"
                placeholder="/path/to/photo.jpg"
                value=(fields.photo_path.as_deref().unwrap_or(""));

            span {}
            button type="submit" { "Save inspection" }
        }
    }
}

/// `<option>` list for the tag select of an equipment type.
pub fn tag_options(equipment_type: &str, selected: &str) -> Markup {
    let tags = tags_for(equipment_type);
    html! {
        option value="" selected[selected.is_empty()] {
            @if tags.is_empty() { "Select equipment type first" } @else { "Select..." }
        }
        @for tag in &tags {
            option value=(tag) selected[tag == selected] { (tag) }
        }
        // keep a stored tag selectable even if it is not in the list
        @if !selected.is_empty() && !tags.iter().any(|t| t == selected) {
            option value=(selected) selected { (selected) }
        }
    }
}
