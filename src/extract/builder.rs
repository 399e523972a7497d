use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use super::normalize::{Field, NormalizedRow};
use crate::models::ClassRecord;

pub const MULTIPLE_INSTRUCTORS: &str = "Multiple Instructors";

const SEAT_SEPARATOR: &str = " of ";

/// A parsed value together with whether parsing fell back to a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Parsed<T> {
    fn ok(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    fn defaulted(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRecord {
    pub record: ClassRecord,
    /// Fields whose parse degraded to a default value.
    pub defaulted: Vec<Field>,
}

pub fn build(row: &NormalizedRow, markup: &str) -> BuiltRecord {
    let text = |field: Field| clean(row.get(field));

    let seat_summary = text(Field::SeatSummary);
    let is_open = parse_is_open(&seat_summary);

    let mut defaulted = Vec::new();
    if is_open.defaulted {
        defaulted.push(Field::SeatSummary);
    }

    let record = ClassRecord {
        course: text(Field::Course),
        title: text(Field::Title),
        section_id: text(Field::SectionId),
        instructor: normalize_instructor(&text(Field::Instructor)),
        days: text(Field::Days),
        start_time: text(Field::StartTime),
        end_time: text(Field::EndTime),
        location: text(Field::Location),
        date_range: text(Field::DateRange),
        units: text(Field::Units),
        seat_summary,
        is_open: is_open.value,
        syllabus_link: find_link(markup).unwrap_or_default(),
    };

    BuiltRecord { record, defaulted }
}

/// Trims a cell and folds multi-line text onto one line.
pub fn clean(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"enrolled of capacity"` is open while enrolled does not exceed capacity.
/// Anything that does not split into two integers reads as closed.
pub fn parse_is_open(summary: &str) -> Parsed<bool> {
    let parts: Vec<&str> = summary.split(SEAT_SEPARATOR).collect();
    if parts.len() != 2 {
        warn!("Invalid seat summary format: {:?}", summary);
        return Parsed::defaulted(false);
    }

    let enrolled = match parts[0].trim().parse::<i64>() {
        Ok(n) => n,
        Err(e) => {
            warn!("Invalid enrolled count in {:?}: {}", summary, e);
            return Parsed::defaulted(false);
        }
    };
    let capacity = match parts[1].trim().parse::<i64>() {
        Ok(n) => n,
        Err(e) => {
            warn!("Invalid capacity in {:?}: {}", summary, e);
            return Parsed::defaulted(false);
        }
    };

    Parsed::ok(enrolled <= capacity)
}

pub fn normalize_instructor(raw: &str) -> String {
    if raw.to_lowercase().contains("multiple instructors") {
        MULTIPLE_INSTRUCTORS.to_string()
    } else {
        raw.to_string()
    }
}

fn url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"https?://[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}(?::\d{1,5})?(?:[/?#][^\s"'<>]*)?"#,
        )
        .unwrap()
    })
}

/// First absolute http(s) URL with a dotted host in the row's markup.
pub fn find_link(markup: &str) -> Option<String> {
    url_pattern()
        .find(markup)
        .map(|m| m.as_str().replace("&amp;", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawRow;
    use crate::extract::normalize::normalize;

    #[test]
    fn test_is_open_compares_enrolled_to_capacity() {
        assert_eq!(parse_is_open("20 of 25"), Parsed { value: true, defaulted: false });
        assert_eq!(parse_is_open("25 of 25"), Parsed { value: true, defaulted: false });
        assert_eq!(parse_is_open("30 of 25"), Parsed { value: false, defaulted: false });
        assert_eq!(parse_is_open("0 of 5"), Parsed { value: true, defaulted: false });
    }

    #[test]
    fn test_is_open_defaults_to_closed() {
        for input in ["TBD", "", "20 of", "of 25", "x of 25", "20 of y", "1 of 2 of 3", "20/25"] {
            let parsed = parse_is_open(input);
            assert!(!parsed.value, "{input:?} should be closed");
            assert!(parsed.defaulted, "{input:?} should be flagged");
        }
    }

    #[test]
    fn test_multiple_instructors_any_casing() {
        assert_eq!(normalize_instructor("Multiple instructors"), MULTIPLE_INSTRUCTORS);
        assert_eq!(normalize_instructor("MULTIPLE INSTRUCTORS"), MULTIPLE_INSTRUCTORS);
        assert_eq!(
            normalize_instructor("Staff, multiple Instructors (see notes)"),
            MULTIPLE_INSTRUCTORS
        );
        assert_eq!(normalize_instructor("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn test_find_link_is_strict() {
        assert_eq!(find_link("no links here"), None);
        assert_eq!(find_link(r#"<a href="/relative/path">x</a>"#), None);
        assert_eq!(find_link("see www.example.edu for details"), None);
        assert_eq!(find_link(r#"<a href="http://localhost/x">x</a>"#), None);
        assert_eq!(
            find_link(r#"<a href="/x">a</a><a href="https://syllabus.asu.edu/a.pdf?id=1&amp;t=2">b</a> https://later.example.com"#),
            Some("https://syllabus.asu.edu/a.pdf?id=1&t=2".to_string())
        );
    }

    #[test]
    fn test_clean_collapses_lines() {
        assert_eq!(clean("  Tempe\n  COOR 170 \n"), "Tempe COOR 170");
        assert_eq!(clean("08/17\r\n- 12/01"), "08/17 - 12/01");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn test_build_full_record() {
        let cells: Vec<String> = [
            "CSE 110", " Principles of Programming ", "Open", "12345", "multiple instructors",
            "MWF", "9:00 AM", "9:50 AM", "Tempe\nCOOR170", "08/17\n- 12/01", "3", "TBD",
            "Books", "Notes", "Details",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        let raw = RawRow::new(cells, r#"<a href="https://example.edu/cse110.pdf">Syllabus</a>"#);
        let row = normalize(&raw).expect("simple row");

        let built = build(&row, &raw.markup);
        let record = built.record;
        assert_eq!(record.title, "Principles of Programming");
        assert_eq!(record.instructor, MULTIPLE_INSTRUCTORS);
        assert_eq!(record.location, "Tempe COOR170");
        assert_eq!(record.date_range, "08/17 - 12/01");
        assert_eq!(record.seat_summary, "TBD");
        assert!(!record.is_open);
        assert_eq!(record.syllabus_link, "https://example.edu/cse110.pdf");
        assert_eq!(built.defaulted, vec![Field::SeatSummary]);
    }
}
