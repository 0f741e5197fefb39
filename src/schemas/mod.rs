mod catalog;

pub use catalog::{Category, Game};
