pub mod artist;
pub mod error;
pub mod schedule;
pub mod show;
pub mod venue;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, sea_query::LikeExpr};

/// Compact row used by listings and search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

impl SearchResults {
    pub fn new(data: Vec<ListingSummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// The other side of a show as seen from a venue or an artist detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCounterpart {
    pub id: i64,
    pub name: String,
    pub image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Id and name pair for select inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOption {
    pub id: i64,
    pub name: String,
}

/// SQL prefilter for a name search. An empty term matches everything.
///
/// SQLite's LIKE only folds ASCII case, so terms with other characters are
/// left to [`name_matches`].
pub(crate) fn name_contains(column: impl ColumnTrait, search_term: &str) -> Condition {
    let term = search_term.trim();
    if term.is_empty() || !term.is_ascii() {
        return Condition::all();
    }

    let pattern = format!("%{}%", escape_like(term));
    Condition::all().add(column.like(LikeExpr::new(pattern).escape('\\')))
}

/// Case-insensitive substring match, applied to rows the prefilter let through.
pub(crate) fn name_matches(name: &str, search_term: &str) -> bool {
    let term = search_term.trim();
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
