use std::fmt;

use crate::catalog::RawRow;

pub const FIELD_COUNT: usize = 11;

/// Positional fields of a normalized row, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Course,
    Title,
    SectionId,
    Instructor,
    Days,
    StartTime,
    EndTime,
    Location,
    DateRange,
    Units,
    SeatSummary,
}

impl Field {
    fn index(self) -> usize {
        self as usize
    }
}

/// Known catalog row layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Simple,
    /// In-person plus online meetings; the location cell says "Hybrid".
    Hybrid,
    /// Team-taught or multi-session rows with an extra "Multiple ..." cell.
    Multiple,
    /// Asynchronous offerings with no day or time cells.
    Online,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Simple => "simple",
            Variant::Hybrid => "hybrid",
            Variant::Multiple => "multiple",
            Variant::Online => "online",
        };
        f.write_str(name)
    }
}

/// Where each canonical field sits in a raw row of a given variant.
/// `None` means the variant never renders that field.
#[derive(Debug)]
pub struct Layout {
    pub width: usize,
    pub columns: [Option<usize>; FIELD_COUNT],
}

const SIMPLE: Layout = Layout {
    width: 15,
    columns: [
        Some(0),
        Some(1),
        Some(3),
        Some(4),
        Some(5),
        Some(6),
        Some(7),
        Some(8),
        Some(9),
        Some(10),
        Some(11),
    ],
};

const WIDE: Layout = Layout {
    width: 16,
    columns: [
        Some(0),
        Some(1),
        Some(3),
        Some(4),
        Some(6),
        Some(7),
        Some(8),
        Some(9),
        Some(10),
        Some(11),
        Some(12),
    ],
};

const ONLINE: Layout = Layout {
    width: 12,
    columns: [
        Some(0),
        Some(1),
        Some(3),
        Some(4),
        None,
        None,
        None,
        Some(5),
        Some(6),
        Some(7),
        Some(8),
    ],
};

const HYBRID_MARKER_AT: usize = 9;
const MULTIPLE_MARKER_AT: usize = 5;
const ONLINE_LOCATIONS: [&str; 3] = ["iCourse", "Internet", "Online"];

impl Variant {
    pub fn layout(self) -> &'static Layout {
        match self {
            Variant::Simple => &SIMPLE,
            Variant::Hybrid | Variant::Multiple => &WIDE,
            Variant::Online => &ONLINE,
        }
    }

    /// Picks the layout from marker text in designated cells.
    pub fn detect(cells: &[String]) -> Variant {
        let at = |i: usize| cells.get(i).map(String::as_str).unwrap_or("");

        if at(HYBRID_MARKER_AT).contains("Hybrid") {
            Variant::Hybrid
        } else if at(MULTIPLE_MARKER_AT).contains("Multiple") {
            Variant::Multiple
        } else if ONLINE_LOCATIONS
            .iter()
            .any(|marker| at(MULTIPLE_MARKER_AT).contains(marker))
        {
            Variant::Online
        } else {
            Variant::Simple
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discard {
    Empty,
    Width {
        variant: Variant,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discard::Empty => write!(f, "row has no cells"),
            Discard::Width {
                variant,
                expected,
                found,
            } => write!(
                f,
                "{} row expects {} cells, found {}",
                variant, expected, found
            ),
        }
    }
}

/// A row reduced to the canonical field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub variant: Variant,
    cells: [String; FIELD_COUNT],
}

impl NormalizedRow {
    pub fn get(&self, field: Field) -> &str {
        &self.cells[field.index()]
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

pub fn normalize(row: &RawRow) -> Result<NormalizedRow, Discard> {
    let cells: Vec<String> = row
        .cells
        .iter()
        .filter(|cell| !cell.trim().is_empty())
        .cloned()
        .collect();

    if cells.is_empty() {
        return Err(Discard::Empty);
    }

    let variant = Variant::detect(&cells);
    let layout = variant.layout();
    if cells.len() != layout.width {
        return Err(Discard::Width {
            variant,
            expected: layout.width,
            found: cells.len(),
        });
    }

    let cells = std::array::from_fn(|i| match layout.columns[i] {
        Some(source) => cells[source].clone(),
        None => String::new(),
    });

    Ok(NormalizedRow { variant, cells })
}
