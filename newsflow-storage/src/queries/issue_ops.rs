//! Issue row operations: insert, compare-and-set merge bump, reads.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use newsflow_core::errors::NewsflowResult;
use newsflow_core::model::Issue;

use super::embedding_ops::bytes_to_f32_vec;
use super::{ts_from_sql, ts_to_sql};
use crate::to_storage_err;

/// Insert a fresh issue (first member just arrived).
/// `article_count = 1`, `started_at = updated_at = created_at = now`.
pub fn insert_issue(
    conn: &Connection,
    title: &str,
    content: &str,
    now: DateTime<Utc>,
) -> NewsflowResult<i64> {
    let ts = ts_to_sql(now);
    conn.execute(
        "INSERT INTO issue (title, content, article_count, started_at, updated_at, created_at)
         VALUES (?1, ?2, 1, ?3, ?3, ?3)",
        params![title, content, ts],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Optimistic merge bump: increment `article_count` iff it still equals
/// `expected_count`, stamping `updated_at`. Returns whether the row was
/// updated — `false` means another merge won the race.
///
/// `updated_at` never moves backwards, so it stays monotonically
/// non-decreasing even when concurrent articles commit out of event order.
pub fn cas_bump_article_count(
    conn: &Connection,
    issue_id: i64,
    expected_count: i64,
    now: DateTime<Utc>,
) -> NewsflowResult<bool> {
    let ts = ts_to_sql(now);
    let updated = conn
        .execute(
            "UPDATE issue
             SET article_count = article_count + 1,
                 updated_at = CASE WHEN updated_at > ?3 THEN updated_at ELSE ?3 END
             WHERE id = ?1 AND article_count = ?2",
            params![issue_id, expected_count, ts],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(updated == 1)
}

/// Fetch an issue row together with its centroid.
pub fn get_issue(conn: &Connection, id: i64) -> NewsflowResult<Option<Issue>> {
    conn.query_row(
        "SELECT i.id, i.title, i.content, i.article_count,
                i.started_at, i.updated_at, i.created_at, e.embedding
         FROM issue i
         JOIN issue_embedding e ON e.issue_id = i.id
         WHERE i.id = ?1",
        [id],
        row_to_issue,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

/// Every issue with its centroid, oldest first.
pub fn list_issues(conn: &Connection) -> NewsflowResult<Vec<Issue>> {
    let mut stmt = conn
        .prepare(
            "SELECT i.id, i.title, i.content, i.article_count,
                    i.started_at, i.updated_at, i.created_at, e.embedding
             FROM issue i
             JOIN issue_embedding e ON e.issue_id = i.id
             ORDER BY i.id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], row_to_issue)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(result)
}

/// Total number of issues.
pub fn issue_count(conn: &Connection) -> NewsflowResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM issue", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

fn row_to_issue(row: &rusqlite::Row<'_>) -> rusqlite::Result<NewsflowResult<Issue>> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let content: String = row.get(2)?;
    let article_count: i64 = row.get(3)?;
    let started_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let blob: Vec<u8> = row.get(7)?;

    Ok((|| {
        Ok(Issue {
            id,
            title,
            content,
            centroid: bytes_to_f32_vec(&blob),
            article_count,
            started_at: ts_from_sql(&started_at)?,
            updated_at: ts_from_sql(&updated_at)?,
            created_at: ts_from_sql(&created_at)?,
        })
    })())
}
