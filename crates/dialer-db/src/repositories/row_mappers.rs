//! Row mapping helpers shared by the `SQLite` repositories.

use chrono::{NaiveDateTime, NaiveTime};
use dialer_core::utils::timestamp::{self, TIME_FORMAT};
use dialer_core::{NameFilter, Page, PageRequest, RepositoryError, Scope};
use sqlx::{QueryBuilder, Sqlite};

/// Translate a sqlx failure into the port's error vocabulary.
///
/// `entity` names the record being written, e.g. `"campaign 'Spring'"`.
pub fn map_sqlx_error(e: sqlx::Error, entity: &str) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::AlreadyExists(entity.to_string());
    }
    if msg.contains("FOREIGN KEY constraint failed") {
        return RepositoryError::Constraint(format!("{entity}: {msg}"));
    }
    RepositoryError::Storage(msg)
}

pub fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

pub fn parse_stored_datetime(value: &str, column: &str) -> Result<NaiveDateTime, RepositoryError> {
    timestamp::parse_datetime(value).ok_or_else(|| {
        RepositoryError::Serialization(format!("{column}: invalid date-time '{value}'"))
    })
}

pub fn parse_stored_time(value: &str, column: &str) -> Result<NaiveTime, RepositoryError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| {
        RepositoryError::Serialization(format!("{column}: invalid time '{value}': {e}"))
    })
}

pub fn format_time(value: NaiveTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

pub fn to_u32(value: i64, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::Serialization(format!("{column}: {value} out of range")))
}

pub fn to_u8(value: i64, column: &str) -> Result<u8, RepositoryError> {
    u8::try_from(value)
        .map_err(|_| RepositoryError::Serialization(format!("{column}: {value} out of range")))
}

/// Build a `LIKE` pattern matching `needle` anywhere, with `\` as escape.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter clauses
// ─────────────────────────────────────────────────────────────────────────────

/// Appends `WHERE`/`AND` connectors as conditions are pushed.
#[derive(Default)]
pub struct WhereClause {
    started: bool,
}

impl WhereClause {
    pub const fn new() -> Self {
        Self { started: false }
    }

    fn connector(&mut self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
    }

    pub fn scope(&mut self, qb: &mut QueryBuilder<'_, Sqlite>, scope: Scope) {
        if let Some(owner) = scope.owner_id() {
            self.connector(qb);
            qb.push("user_id = ").push_bind(owner);
        }
    }

    pub fn name(
        &mut self,
        qb: &mut QueryBuilder<'_, Sqlite>,
        column: &str,
        filter: Option<&NameFilter>,
    ) {
        match filter {
            Some(NameFilter::Exact(name)) => {
                self.connector(qb);
                qb.push(column).push(" = ").push_bind(name.clone());
            }
            Some(NameFilter::Contains(needle)) => {
                self.connector(qb);
                qb.push(column)
                    .push(" LIKE ")
                    .push_bind(contains_pattern(needle))
                    .push(" ESCAPE '\\'");
            }
            None => {}
        }
    }

    pub fn equals(&mut self, qb: &mut QueryBuilder<'_, Sqlite>, column: &str, value: i64) {
        self.connector(qb);
        qb.push(column).push(" = ").push_bind(value);
    }
}

pub fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: PageRequest) {
    qb.push(" ORDER BY id LIMIT ")
        .push_bind(i64::from(page.limit))
        .push(" OFFSET ")
        .push_bind(i64::from(page.offset));
}

pub fn to_page<T>(items: Vec<T>, total: i64, page: PageRequest) -> Page<T> {
    Page::new(items, u64::try_from(total).unwrap_or_default(), page)
}
