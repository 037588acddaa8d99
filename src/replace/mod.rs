pub mod table;
pub mod text;
