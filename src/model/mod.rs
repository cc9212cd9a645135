pub mod entry;
pub mod report;
