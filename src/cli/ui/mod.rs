pub mod format;
pub mod labels;
pub mod table;
