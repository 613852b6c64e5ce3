use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

use super::stats::{INSERT_RECORD_ENDPOINT, bump_endpoint_counter};

pub const RECORDS_TABLE: &str = "example_table";
pub const STATS_TABLE: &str = "app_stats";

pub const DEFAULT_DEPARTMENT: &str = "General";

/// A fully populated row of `example_table`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl NewRecord {
    pub fn new(name: String, email: Option<String>, department: Option<String>) -> Self {
        Self {
            name,
            email: email.unwrap_or_default(),
            department: department.unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        }
    }
}

/// Search results omit `updated_at`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub created_at: String,
}

pub async fn init_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let schema = include_str!("schema.sql");
    sqlx::raw_sql(schema).execute(pool).await?;
    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1 AS db_test").fetch_one(pool).await?;
    Ok(())
}

/// Inserts the record and bumps the `insert_record` counter in one transaction.
pub async fn insert_record(pool: &SqlitePool, record: &NewRecord) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO example_table (name, email, department)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.department)
    .execute(&mut *tx)
    .await?;

    bump_endpoint_counter(&mut tx, INSERT_RECORD_ENDPOINT).await?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

pub async fn count_records(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM example_table")
        .fetch_one(pool)
        .await?;

    row.try_get("total")
}

pub async fn list_records(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Record>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, email, department, created_at, updated_at
        FROM example_table
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(Record {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            department: row.try_get("department")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        });
    }

    Ok(records)
}

/// Wraps `term` for a `LIKE ... ESCAPE '\'` substring match, so that `%`, `_`
/// and `\` in user input match themselves.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub async fn search_records(pool: &SqlitePool, term: &str) -> Result<Vec<SearchHit>, sqlx::Error> {
    let pattern = like_pattern(term);

    let rows = sqlx::query(
        r#"
        SELECT id, name, email, department, created_at
        FROM example_table
        WHERE name LIKE ?1 ESCAPE '\'
           OR email LIKE ?1 ESCAPE '\'
           OR department LIKE ?1 ESCAPE '\'
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    let mut hits = Vec::with_capacity(rows.len());
    for row in rows {
        hits.push(SearchHit {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            department: row.try_get("department")?,
            created_at: row.try_get("created_at")?,
        });
    }

    Ok(hits)
}

/// Deletes the record and returns its name, or `None` if no row had that id.
pub async fn delete_record(pool: &SqlitePool, id: i64) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("DELETE FROM example_table WHERE id = ? RETURNING name")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|row| row.try_get("name")).transpose()
}
