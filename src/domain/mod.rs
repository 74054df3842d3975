pub mod changes;
pub mod dates;
pub mod inspection;
pub mod options;
pub mod status;
