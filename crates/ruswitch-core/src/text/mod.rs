pub mod case;
pub mod mapping;
pub mod word;
