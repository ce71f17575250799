//! StorageEngine — owns the ConnectionPool, implements IIssueStore,
//! startup migrations, transactional merge/create commits.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

use newsflow_core::errors::{NewsflowResult, StorageError};
use newsflow_core::model::{Article, ArticleDraft, Issue};
use newsflow_core::traits::IIssueStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{article_ops, dead_letter, embedding_ops, issue_ops};
use crate::to_storage_err;

/// The main storage engine. Owns the connection pool and provides the
/// full IIssueStore interface. The relational store is authoritative for
/// centroids; the vector index is reconciled from the rows written here.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> NewsflowResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). All reads route
    /// through the writer — in-memory read pool connections would be
    /// isolated databases.
    pub fn open_in_memory() -> NewsflowResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> NewsflowResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> NewsflowResult<T>
    where
        F: FnOnce(&Connection) -> NewsflowResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    /// Run `f` inside a write transaction; rollback on error.
    fn in_write_tx<F, T>(&self, f: F) -> NewsflowResult<T>
    where
        F: FnOnce(&Connection) -> NewsflowResult<T>,
    {
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("begin: {e}")))?;
            match f(&tx) {
                Ok(value) => {
                    tx.commit()
                        .map_err(|e| to_storage_err(format!("commit: {e}")))?;
                    Ok(value)
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })
    }

    /// Dead letters recorded so far (monitoring/tests).
    pub fn dead_letter_count(&self) -> NewsflowResult<usize> {
        self.with_reader(dead_letter::dead_letter_count)
    }
}

impl IIssueStore for StorageEngine {
    fn find_article_by_title_hash(&self, title_hash: &str) -> NewsflowResult<Option<Article>> {
        self.with_reader(|conn| article_ops::find_by_title_hash(conn, title_hash))
    }

    fn get_issue(&self, id: i64) -> NewsflowResult<Option<Issue>> {
        self.with_reader(|conn| issue_ops::get_issue(conn, id))
    }

    fn articles_for_issue(&self, issue_id: i64) -> NewsflowResult<Vec<Article>> {
        self.with_reader(|conn| article_ops::articles_for_issue(conn, issue_id))
    }

    fn embeddings_for_issue(&self, issue_id: i64) -> NewsflowResult<Vec<Vec<f32>>> {
        self.with_reader(|conn| embedding_ops::embeddings_for_issue(conn, issue_id))
    }

    fn list_issues(&self) -> NewsflowResult<Vec<Issue>> {
        self.with_reader(issue_ops::list_issues)
    }

    fn create_issue(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        now: DateTime<Utc>,
    ) -> NewsflowResult<(Issue, Article)> {
        self.in_write_tx(|conn| {
            let issue_id = issue_ops::insert_issue(conn, &draft.title, &draft.content, now)?;
            let article_id = article_ops::insert_article(conn, draft, issue_id, now)?;
            embedding_ops::insert_article_embedding(conn, article_id, embedding, now)?;
            embedding_ops::upsert_issue_embedding(conn, issue_id, embedding, now)?;

            let issue = issue_ops::get_issue(conn, issue_id)?.ok_or_else(|| {
                to_storage_err(format!("issue {issue_id} vanished inside its own transaction"))
            })?;
            let article = row_article(draft, article_id, issue_id, now);

            debug!(issue_id, article_id, "created issue");
            Ok((issue, article))
        })
    }

    fn merge_article(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        issue_id: i64,
        expected_count: i64,
        new_centroid: &[f32],
        now: DateTime<Utc>,
    ) -> NewsflowResult<(Issue, Article)> {
        self.in_write_tx(|conn| {
            if !issue_ops::cas_bump_article_count(conn, issue_id, expected_count, now)? {
                return Err(StorageError::Conflict {
                    issue_id,
                    expected_count,
                }
                .into());
            }

            let article_id = article_ops::insert_article(conn, draft, issue_id, now)?;
            embedding_ops::insert_article_embedding(conn, article_id, embedding, now)?;
            embedding_ops::upsert_issue_embedding(conn, issue_id, new_centroid, now)?;

            let issue = issue_ops::get_issue(conn, issue_id)?.ok_or_else(|| {
                to_storage_err(format!("issue {issue_id} vanished during merge"))
            })?;
            let article = row_article(draft, article_id, issue_id, now);

            debug!(issue_id, article_id, article_count = issue.article_count, "merged article");
            Ok((issue, article))
        })
    }

    fn issue_count(&self) -> NewsflowResult<usize> {
        self.with_reader(issue_ops::issue_count)
    }

    fn record_dead_letter(
        &self,
        title_hash: &str,
        payload: &str,
        reason: &str,
    ) -> NewsflowResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| dead_letter::insert_dead_letter(conn, title_hash, payload, reason))
    }
}

/// Materialize the persisted article row without a read-back.
fn row_article(draft: &ArticleDraft, id: i64, issue_id: i64, now: DateTime<Utc>) -> Article {
    Article {
        id,
        issue_id,
        title: draft.title.clone(),
        content: draft.content.clone(),
        source: draft.source.clone(),
        url: draft.url.clone(),
        title_hash: draft.title_hash.clone(),
        created_at: now,
        published_at: draft.published_at,
    }
}
