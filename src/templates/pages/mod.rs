pub mod inspection_detail;
pub mod inspection_form;
pub mod inspections;
pub mod reports;

pub use inspection_detail::{inspection_detail_page, DetailVm};
pub use inspection_form::{inspection_form, inspection_form_page, tag_options};
pub use inspections::{inspections_page, InspectionListVm, InspectionRow};
pub use reports::{batch_result_page, reports_page, summary_result_page};
