//! Embedding blob storage for articles and issue centroids.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use newsflow_core::errors::NewsflowResult;

use super::ts_to_sql;
use crate::to_storage_err;

/// Convert f32 slice to bytes (little-endian).
pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Store the embedding of a newly persisted article.
pub fn insert_article_embedding(
    conn: &Connection,
    article_id: i64,
    embedding: &[f32],
    now: DateTime<Utc>,
) -> NewsflowResult<()> {
    conn.execute(
        "INSERT INTO article_embedding (article_id, embedding, dimensions, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            article_id,
            f32_vec_to_bytes(embedding),
            embedding.len() as i64,
            ts_to_sql(now)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Insert or replace an issue's centroid.
pub fn upsert_issue_embedding(
    conn: &Connection,
    issue_id: i64,
    centroid: &[f32],
    now: DateTime<Utc>,
) -> NewsflowResult<()> {
    conn.execute(
        "INSERT INTO issue_embedding (issue_id, embedding, dimensions, created_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(issue_id) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions",
        params![
            issue_id,
            f32_vec_to_bytes(centroid),
            centroid.len() as i64,
            ts_to_sql(now)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Stored embeddings of every article owned by an issue.
pub fn embeddings_for_issue(conn: &Connection, issue_id: i64) -> NewsflowResult<Vec<Vec<f32>>> {
    let mut stmt = conn
        .prepare(
            "SELECT ae.embedding
             FROM article_embedding ae
             JOIN article a ON a.id = ae.article_id
             WHERE a.issue_id = ?1
             ORDER BY a.id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([issue_id], |row| {
            let blob: Vec<u8> = row.get(0)?;
            Ok(blob)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut result = Vec::new();
    for row in rows {
        let blob = row.map_err(|e| to_storage_err(e.to_string()))?;
        result.push(bytes_to_f32_vec(&blob));
    }
    Ok(result)
}
