use serde::{Deserialize, Serialize};

/// One class offering as listed in the catalog.
///
/// Built once per extraction and never mutated afterwards; every field is
/// populated according to the row's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub course: String,
    pub title: String,
    pub section_id: String,
    pub instructor: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub date_range: String,
    pub units: String,
    pub seat_summary: String,
    pub is_open: bool,
    pub syllabus_link: String,
}
