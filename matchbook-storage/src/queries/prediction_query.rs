//! Filtered, sorted, paginated listing over predictions.
//!
//! Every filter value is bound through the driver's parameter mechanism;
//! only allow-listed sort expressions ever reach the query text.

use rusqlite::types::ToSql;
use rusqlite::Connection;

use matchbook_core::errors::MatchbookResult;
use matchbook_core::models::{
    FilterValues, PageRequest, PredictionFilter, PredictionPage, SortDir, SortKey,
};

use super::prediction_crud::{parse_prediction_row, PREDICTION_COLUMNS};
use crate::to_storage_err;

/// Accumulates WHERE predicates and their bound values with positional
/// placeholders. The clause text never contains user input.
struct QueryBuilder {
    clauses: Vec<String>,
    params: Vec<Box<dyn ToSql>>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self {
            clauses: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Add a predicate with one bound value. `{}` in the template is
    /// replaced with the positional placeholder.
    fn push(&mut self, template: &str, value: Box<dyn ToSql>) {
        self.params.push(value);
        let placeholder = format!("?{}", self.params.len());
        self.clauses.push(template.replace("{}", &placeholder));
    }

    /// The WHERE clause, empty string when no predicates were added.
    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Translate a filter into WHERE predicates with bound values.
fn build_filter(filter: &PredictionFilter) -> QueryBuilder {
    let mut builder = QueryBuilder::new();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let like = format!("%{}%", search.trim().to_lowercase());
        // SQLite allows the same ?N placeholder to appear multiple times.
        builder.push(
            "(LOWER(tournament) LIKE {} OR LOWER(player1) LIKE {} OR LOWER(player2) LIKE {})",
            Box::new(like),
        );
    }
    if let Some(tournament) = filter.tournament.as_deref().filter(|s| !s.is_empty()) {
        builder.push("tournament = {}", Box::new(tournament.to_string()));
    }
    if let Some(surface) = filter.surface.as_deref().filter(|s| !s.is_empty()) {
        builder.push("surface = {}", Box::new(surface.to_string()));
    }
    if let Some(phase) = filter.learning_phase {
        builder.push("learning_phase = {}", Box::new(phase.as_str().to_string()));
    }
    if let Some(action) = filter.recommended_action.as_deref().filter(|s| !s.is_empty()) {
        builder.push("recommended_action = {}", Box::new(action.to_string()));
    }
    if let Some(value_bet) = filter.value_bet {
        builder.push("value_bet = {}", Box::new(value_bet as i32));
    }
    if let Some(correct) = filter.prediction_correct {
        builder.push("prediction_correct = {}", Box::new(correct as i32));
    }
    if let Some(min) = filter.min_confidence {
        builder.push("confidence_score >= {}", Box::new(i64::from(min)));
    }
    if let Some(max) = filter.max_confidence {
        builder.push("confidence_score <= {}", Box::new(i64::from(max)));
    }
    if let Some(from) = filter.date_from {
        builder.push(
            "prediction_day >= {}",
            Box::new(from.format("%Y-%m-%d").to_string()),
        );
    }
    if let Some(to) = filter.date_to {
        builder.push(
            "prediction_day <= {}",
            Box::new(to.format("%Y-%m-%d").to_string()),
        );
    }

    builder
}

/// The ORDER BY expression for an allow-listed sort key. Fixed strings
/// only; a client-requested key never reaches this function unparsed.
fn sort_expr(sort: SortKey) -> &'static str {
    match sort {
        SortKey::PredictionDay => "prediction_day",
        SortKey::CreatedAt => "created_at",
        SortKey::ConfidenceScore => "confidence_score",
        SortKey::SystemAccuracy => "system_accuracy",
        SortKey::PredictedOdds => {
            "CASE WHEN predicted_winner = player1 THEN odds_player1 ELSE odds_player2 END"
        }
    }
}

/// Run the page query plus a count query over the same predicates.
pub fn list_predictions(
    conn: &Connection,
    filter: &PredictionFilter,
    sort: SortKey,
    dir: SortDir,
    page: PageRequest,
) -> MatchbookResult<PredictionPage> {
    let builder = build_filter(filter);
    let where_sql = builder.where_sql();

    let total = count_predictions(conn, &builder, &where_sql)?;

    let dir_sql = match dir {
        SortDir::Asc => "ASC",
        SortDir::Desc => "DESC",
    };
    let limit_idx = builder.params.len() + 1;
    let sql = format!(
        "SELECT {PREDICTION_COLUMNS} FROM predictions{where_sql}
         ORDER BY {order} {dir_sql}
         LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
        order = sort_expr(sort),
        offset_idx = limit_idx + 1,
    );

    let mut params = builder.param_refs();
    let limit = i64::from(page.page_size);
    // Bounded by u32 page * clamped page_size, well inside i64.
    let offset = page.offset() as i64;
    params.push(&limit);
    params.push(&offset);

    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params.as_slice(), |row| Ok(parse_prediction_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let prediction = row.map_err(|e| to_storage_err(e.to_string()))??;
        results.push(prediction);
    }

    Ok(PredictionPage {
        rows: results,
        total,
    })
}

/// Count query over the same predicates, no limit/offset.
fn count_predictions(
    conn: &Connection,
    builder: &QueryBuilder,
    where_sql: &str,
) -> MatchbookResult<u32> {
    let sql = format!("SELECT COUNT(*) FROM predictions{where_sql}");
    let params = builder.param_refs();
    let total: i64 = conn
        .query_row(&sql, params.as_slice(), |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(total.max(0) as u32)
}

/// Distinct non-empty tournaments, surfaces, and learning phases.
pub fn distinct_filter_values(conn: &Connection) -> MatchbookResult<FilterValues> {
    Ok(FilterValues {
        tournaments: distinct_column(conn, "tournament")?,
        surfaces: distinct_column(conn, "surface")?,
        learning_phases: distinct_column(conn, "learning_phase")?,
    })
}

fn distinct_column(conn: &Connection, column: &str) -> MatchbookResult<Vec<String>> {
    // `column` comes from the three fixed call sites above, never a client.
    let sql = format!(
        "SELECT DISTINCT {column} FROM predictions WHERE {column} != '' ORDER BY {column}"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut values = Vec::new();
    for row in rows {
        values.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(values)
}
