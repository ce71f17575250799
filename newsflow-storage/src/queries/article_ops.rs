//! Article row operations.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use newsflow_core::errors::NewsflowResult;
use newsflow_core::model::{Article, ArticleDraft};

use super::{ts_from_sql, ts_to_sql};
use crate::to_storage_err;

/// Persist an article already assigned to its issue.
pub fn insert_article(
    conn: &Connection,
    draft: &ArticleDraft,
    issue_id: i64,
    now: DateTime<Utc>,
) -> NewsflowResult<i64> {
    conn.execute(
        "INSERT INTO article (issue_id, title, content, source, url, title_hash, created_at, published_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            issue_id,
            draft.title,
            draft.content,
            draft.source,
            draft.url,
            draft.title_hash,
            ts_to_sql(now),
            draft.published_at.map(ts_to_sql),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Look up an article by its dedup key.
pub fn find_by_title_hash(conn: &Connection, title_hash: &str) -> NewsflowResult<Option<Article>> {
    conn.query_row(
        "SELECT id, issue_id, title, content, source, url, title_hash, created_at, published_at
         FROM article WHERE title_hash = ?1
         ORDER BY id LIMIT 1",
        [title_hash],
        row_to_article,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

/// All articles owned by an issue, oldest first.
pub fn articles_for_issue(conn: &Connection, issue_id: i64) -> NewsflowResult<Vec<Article>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, issue_id, title, content, source, url, title_hash, created_at, published_at
             FROM article WHERE issue_id = ?1
             ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([issue_id], row_to_article)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(result)
}

fn row_to_article(row: &rusqlite::Row<'_>) -> rusqlite::Result<NewsflowResult<Article>> {
    let id: i64 = row.get(0)?;
    let issue_id: i64 = row.get(1)?;
    let title: String = row.get(2)?;
    let content: String = row.get(3)?;
    let source: String = row.get(4)?;
    let url: String = row.get(5)?;
    let title_hash: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let published_at: Option<String> = row.get(8)?;

    Ok((|| {
        Ok(Article {
            id,
            issue_id,
            title,
            content,
            source,
            url,
            title_hash,
            created_at: ts_from_sql(&created_at)?,
            published_at: published_at.as_deref().map(ts_from_sql).transpose()?,
        })
    })())
}
