#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use class_catalog::cache::CacheBackend;
use class_catalog::catalog::{RawRow, RowSource};
use class_catalog::error::AppError;
use class_catalog::models::Query;

pub fn simple_row(section_id: &str, seats: &str) -> RawRow {
    let cells = vec![
        "CSE 110".to_string(),
        "Principles of Programming".to_string(),
        "Open".to_string(),
        section_id.to_string(),
        "Jane Doe".to_string(),
        "MWF".to_string(),
        "9:00 AM".to_string(),
        "9:50 AM".to_string(),
        "Tempe - COOR170".to_string(),
        "08/17 - 12/01".to_string(),
        "3".to_string(),
        seats.to_string(),
        "Books".to_string(),
        "Notes".to_string(),
        "Details".to_string(),
    ];
    RawRow::new(
        cells,
        format!(r#"<div><a href="https://syllabus.example.edu/{section_id}.pdf">Syllabus</a></div>"#),
    )
}

/// Row source serving canned rows and counting how often it is asked.
pub struct StubSource {
    rows: Vec<RawRow>,
    fail: bool,
    calls: AtomicUsize,
    queries: Mutex<Vec<Query>>,
}

impl StubSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            fail: false,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RowSource for StubSource {
    async fn fetch_rows(&self, query: &Query) -> Result<Vec<RawRow>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(AppError::Upstream("catalog unreachable".to_string()));
        }
        Ok(self.rows.clone())
    }
}

/// Cache that is always unreachable.
pub struct BrokenCache {
    pub writes: AtomicUsize,
}

impl BrokenCache {
    pub fn new() -> Self {
        Self {
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CacheBackend for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::Upstream("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), AppError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Upstream("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Upstream("connection refused".to_string()))
    }
}
