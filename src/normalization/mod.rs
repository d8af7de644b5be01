pub mod field;
pub mod items;
