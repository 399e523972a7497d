pub mod class;
pub mod query;

pub use class::ClassRecord;
pub use query::Query;
