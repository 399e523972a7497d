use std::fmt;

const SECTION_ID_LEN: usize = 5;
const COURSE_PART_LEN: usize = 3;

/// What a lookup asks the catalog for.
///
/// Values are taken as given; [`Query::is_valid`] decides whether the
/// catalog is worth contacting at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    All,
    Section(String),
    Course { subject: String, number: String },
}

impl Query {
    pub fn section(id: impl Into<String>) -> Self {
        Query::Section(id.into())
    }

    pub fn course(subject: impl Into<String>, number: impl Into<String>) -> Self {
        Query::Course {
            subject: subject.into(),
            number: number.into(),
        }
    }

    /// Splits a 6-character course code such as `CSEABC` into subject and
    /// number. Returns `None` for any other length.
    pub fn from_course_code(code: &str) -> Option<Self> {
        if code.chars().count() != COURSE_PART_LEN * 2 || !code.is_ascii() {
            return None;
        }
        let (subject, number) = code.split_at(COURSE_PART_LEN);
        Some(Query::course(subject, number))
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Query::All => true,
            Query::Section(id) => id.chars().count() == SECTION_ID_LEN,
            Query::Course { subject, number } => {
                subject.len() == COURSE_PART_LEN
                    && subject.chars().all(|c| c.is_ascii_alphabetic())
                    && number.len() == COURSE_PART_LEN
                    && number.chars().all(|c| c.is_ascii_alphabetic())
            }
        }
    }

    /// Cache key for this query. The same query always maps to the same key.
    pub fn cache_key(&self) -> String {
        match self {
            Query::All => "classes".to_string(),
            Query::Section(id) => format!("classes:{}", id),
            Query::Course { subject, number } => format!("classes:course:{}{}", subject, number),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::All => write!(f, "all classes"),
            Query::Section(id) => write!(f, "section {}", id),
            Query::Course { subject, number } => write!(f, "course {} {}", subject, number),
        }
    }
}
