pub mod class_store;

pub use class_store::{ClassStore, Lookup, LookupSource};
