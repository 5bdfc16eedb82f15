pub mod selectors;
pub mod spec;
