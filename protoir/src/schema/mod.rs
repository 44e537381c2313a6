pub mod option;
pub mod package;
pub mod types;
