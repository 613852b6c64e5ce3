use serde::Serialize;
use sqlx::{Row, SqliteConnection, SqlitePool};

pub const INSERT_RECORD_ENDPOINT: &str = "insert_record";

/// Increments the usage counter for `endpoint`, creating it at 1 if absent.
pub async fn bump_endpoint_counter(
    conn: &mut SqliteConnection,
    endpoint: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO app_stats (endpoint, request_count)
        VALUES (?, 1)
        ON CONFLICT(endpoint) DO UPDATE SET
            request_count = request_count + 1,
            last_accessed = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(endpoint)
    .execute(conn)
    .await?;

    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

pub async fn get_department_breakdown(
    pool: &SqlitePool,
) -> Result<Vec<DepartmentCount>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT department, COUNT(*) AS count
        FROM example_table
        GROUP BY department
        ORDER BY count DESC, department ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut breakdown = Vec::new();
    for row in rows {
        breakdown.push(DepartmentCount {
            department: row.try_get("department")?,
            count: row.try_get("count")?,
        });
    }

    Ok(breakdown)
}

#[derive(Debug, Serialize)]
pub struct RecentActivity {
    pub name: String,
    pub department: String,
    pub created_at: String,
}

pub async fn get_recent_activity(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<RecentActivity>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT name, department, created_at
        FROM example_table
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut activity = Vec::new();
    for row in rows {
        activity.push(RecentActivity {
            name: row.try_get("name")?,
            department: row.try_get("department")?,
            created_at: row.try_get("created_at")?,
        });
    }

    Ok(activity)
}

#[cfg(test)]
pub async fn get_endpoint_count(pool: &SqlitePool, endpoint: &str) -> Result<Option<i64>, sqlx::Error> {
    let row = sqlx::query("SELECT request_count FROM app_stats WHERE endpoint = ?")
        .bind(endpoint)
        .fetch_optional(pool)
        .await?;

    row.map(|row| row.try_get("request_count")).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewRecord, insert_record, test_pool};

    async fn seed(pool: &SqlitePool, name: &str, department: &str) {
        let record = NewRecord::new(name.to_string(), None, Some(department.to_string()));
        insert_record(pool, &record).await.unwrap();
    }

    #[tokio::test]
    async fn counter_starts_at_one_and_increments() {
        let pool = test_pool().await;
        assert_eq!(get_endpoint_count(&pool, INSERT_RECORD_ENDPOINT).await.unwrap(), None);

        seed(&pool, "Ada", "Eng").await;
        assert_eq!(get_endpoint_count(&pool, INSERT_RECORD_ENDPOINT).await.unwrap(), Some(1));

        seed(&pool, "Grace", "Navy").await;
        assert_eq!(get_endpoint_count(&pool, INSERT_RECORD_ENDPOINT).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn breakdown_orders_by_count() {
        let pool = test_pool().await;
        seed(&pool, "Ada", "Eng").await;
        seed(&pool, "Linus", "Eng").await;
        seed(&pool, "Grace", "Navy").await;
        seed(&pool, "Alan", "Crypto").await;

        let breakdown = get_department_breakdown(&pool).await.unwrap();
        let pairs: Vec<_> = breakdown
            .iter()
            .map(|d| (d.department.as_str(), d.count))
            .collect();
        assert_eq!(pairs, vec![("Eng", 2), ("Crypto", 1), ("Navy", 1)]);
    }

    #[tokio::test]
    async fn recent_activity_is_capped() {
        let pool = test_pool().await;
        for i in 0..12 {
            seed(&pool, &format!("user{i}"), "General").await;
        }

        let activity = get_recent_activity(&pool, 10).await.unwrap();
        assert_eq!(activity.len(), 10);
        assert_eq!(activity[0].name, "user11");
        assert_eq!(activity[9].name, "user2");
    }
}
