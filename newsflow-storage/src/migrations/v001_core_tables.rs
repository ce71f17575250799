//! v001: issue, article, article_embedding, issue_embedding, dead_letter.

use rusqlite::Connection;

use newsflow_core::errors::NewsflowResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> NewsflowResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS issue (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            title         TEXT NOT NULL,
            content       TEXT NOT NULL,
            article_count INTEGER NOT NULL DEFAULT 1,
            started_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS article (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            issue_id     INTEGER NOT NULL DEFAULT 0,
            title        TEXT NOT NULL,
            content      TEXT NOT NULL,
            source       TEXT NOT NULL,
            url          TEXT NOT NULL,
            title_hash   TEXT NOT NULL,
            created_at   TEXT NOT NULL,
            published_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_article_title_hash ON article(title_hash);
        CREATE INDEX IF NOT EXISTS idx_article_issue_id ON article(issue_id);

        CREATE TABLE IF NOT EXISTS article_embedding (
            article_id INTEGER PRIMARY KEY,
            embedding  BLOB NOT NULL,
            dimensions INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (article_id) REFERENCES article(id)
        );

        CREATE TABLE IF NOT EXISTS issue_embedding (
            issue_id   INTEGER PRIMARY KEY,
            embedding  BLOB NOT NULL,
            dimensions INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (issue_id) REFERENCES issue(id)
        );

        CREATE TABLE IF NOT EXISTS dead_letter (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            title_hash TEXT NOT NULL,
            payload    TEXT NOT NULL,
            reason     TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
