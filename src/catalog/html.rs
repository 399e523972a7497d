use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

use super::RawRow;

fn row_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(".class-accordion").unwrap())
}

fn cell_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse(".class-results-cell").unwrap())
}

/// Splits a rendered class-list page into rows of cell texts.
///
/// Pages without row containers (single-class results) become one row made
/// of every cell on the page.
pub fn parse_rows(body: &str) -> Vec<RawRow> {
    let document = Html::parse_document(body);

    let rows: Vec<RawRow> = document
        .select(row_selector())
        .map(|row| RawRow::new(cell_texts(row), row.html()))
        .filter(|row| !row.cells.is_empty())
        .collect();

    if !rows.is_empty() {
        return rows;
    }

    let root = document.root_element();
    let cells = cell_texts(root);
    if cells.is_empty() {
        return Vec::new();
    }
    vec![RawRow::new(cells, root.html())]
}

fn cell_texts(scope: ElementRef<'_>) -> Vec<String> {
    scope
        .select(cell_selector())
        .map(|cell| cell_text(&cell.text().collect::<String>()))
        .collect()
}

fn cell_text(raw: &str) -> String {
    raw.trim_end().replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_groups_cells_by_row() {
        let body = r#"
            <div class="class-accordion">
                <div class="class-results-cell">CSE 110</div>
                <div class="class-results-cell">Principles of Programming
</div>
                <a href="https://example.edu/syllabus.pdf">Syllabus</a>
            </div>
            <div class="class-accordion">
                <div class="class-results-cell">MAT 265</div>
            </div>
        "#;

        let rows = parse_rows(body);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec!["CSE 110", "Principles of Programming"]);
        assert!(rows[0].markup.contains("syllabus.pdf"));
        assert_eq!(rows[1].cells, vec!["MAT 265"]);
    }

    #[test]
    fn test_parse_rows_without_containers_is_single_row() {
        let body = r#"<div class="class-results-cell">CSE 110</div>
            <div class="class-results-cell">Tempe
Campus</div>"#;

        let rows = parse_rows(body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells, vec!["CSE 110", "Tempe Campus"]);
    }

    #[test]
    fn test_parse_rows_empty_page() {
        assert!(parse_rows("<html><body>No classes found</body></html>").is_empty());
    }
}
