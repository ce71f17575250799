//! The per-article decision pipeline.
//!
//! Stages run strictly in order: `Received -> Embedded -> Scored ->
//! {Merged, Created}`. Any failure aborts the article's transition with no
//! partial writes — each commit is a single storage transaction. The
//! pipeline holds no state of its own; it is a pure function over
//! (article, embedder, vector index, relational store, config).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use newsflow_core::config::{ClusteringConfig, NewsflowConfig};
use newsflow_core::deadline::Deadline;
use newsflow_core::errors::{EmbeddingError, NewsflowError, NewsflowResult, StorageError};
use newsflow_core::model::{ArticleDraft, Candidate, Decision, Issue, PipelineStage};
use newsflow_core::traits::{IEmbeddingProvider, IIssueStore, IVectorIndex};

use crate::centroid;
use crate::index::InMemoryIndex;
use crate::ranking;
use crate::scoring;
use crate::separability::{separability, SEPARABILITY_BYPASS};

/// The clustering decision core.
///
/// Safe to share across threads; articles may be processed in parallel.
/// Merges into the same issue serialize through the store's
/// compare-and-set, retried here with fresh issue state.
pub struct ClusterPipeline {
    embedder: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
    store: Arc<dyn IIssueStore>,
    config: ClusteringConfig,
    embedding_dim: usize,
}

impl ClusterPipeline {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        index: Arc<dyn IVectorIndex>,
        store: Arc<dyn IIssueStore>,
        config: ClusteringConfig,
        embedding_dim: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            store,
            config,
            embedding_dim,
        }
    }

    /// Wire the whole stack from configuration: storage engine, embedding
    /// engine, and an in-memory index warmed from the persisted issues.
    pub fn from_config(config: &NewsflowConfig) -> NewsflowResult<Self> {
        config.validate()?;

        let store: Arc<dyn IIssueStore> = if config.storage.path == ":memory:" {
            Arc::new(newsflow_storage::StorageEngine::open_in_memory()?)
        } else {
            Arc::new(newsflow_storage::StorageEngine::open(
                std::path::Path::new(&config.storage.path),
                config.storage.read_pool_size,
            )?)
        };

        let embedder: Arc<dyn IEmbeddingProvider> =
            Arc::new(newsflow_embeddings::EmbeddingEngine::new(&config.embedding)?);

        let index = Arc::new(InMemoryIndex::new(config.embedding.dimensions));
        let issues = store.list_issues()?;
        for issue in &issues {
            index.upsert(issue.id, &issue.centroid, issue.updated_at)?;
        }
        info!(issues = issues.len(), "vector index warmed from store");

        Ok(Self::new(
            embedder,
            index,
            store,
            config.clustering.clone(),
            config.embedding.dimensions,
        ))
    }

    /// Decide where one article belongs and commit the outcome.
    ///
    /// `now` is the event time used for time decay and timestamps;
    /// `deadline` bounds every suspension point. On an invariant violation
    /// the article is dead-lettered and the error returned; nothing is
    /// persisted.
    pub fn process(
        &self,
        draft: &ArticleDraft,
        now: DateTime<Utc>,
        deadline: &Deadline,
    ) -> NewsflowResult<Decision> {
        let result = self.run(draft, now, deadline);
        self.route_poison(draft, result)
    }

    fn run(
        &self,
        draft: &ArticleDraft,
        now: DateTime<Utc>,
        deadline: &Deadline,
    ) -> NewsflowResult<Decision> {
        deadline.check(PipelineStage::Received)?;

        // Idempotent replay: an already-assigned title hash resolves to the
        // same issue without touching anything.
        if let Some(existing) = self.store.find_article_by_title_hash(&draft.title_hash)? {
            debug!(
                article_id = existing.id,
                issue_id = existing.issue_id,
                "duplicate title hash, replaying prior assignment"
            );
            return Ok(Decision::Duplicate { article: existing });
        }

        deadline.check(PipelineStage::Embedded)?;
        let embedding = self.embedder.embed(&draft.title, &draft.content, deadline)?;
        if embedding.len() != self.embedding_dim {
            // The embedder broke its contract — upstream fault, retryable.
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.embedding_dim,
                actual: embedding.len(),
            }
            .into());
        }
        centroid::validate_vector(&embedding, self.embedding_dim, "article embedding")?;

        deadline.check(PipelineStage::Scored)?;
        let mut candidates = self.score_candidates(&embedding, now)?;
        ranking::rank(&mut candidates);

        if candidates.is_empty() {
            debug!("no candidates, opening a new issue");
            return self.create(draft, &embedding, now, deadline);
        }

        let best = &candidates[0];
        let sep = match candidates.get(1) {
            Some(neighbor) => separability(best.similarity, neighbor.similarity),
            None => SEPARABILITY_BYPASS,
        };

        debug!(
            issue_id = best.issue.id,
            similarity = best.similarity,
            score = best.score,
            threshold = best.threshold,
            separability = sep,
            "best candidate scored"
        );

        if best.score >= best.threshold && sep > 0.0 {
            let best = candidates.swap_remove(0);
            self.merge(draft, &embedding, best, sep, now, deadline)
        } else {
            self.create(draft, &embedding, now, deadline)
        }
    }

    /// Retrieve the top-k shortlist and score each candidate against the
    /// authoritative issue rows.
    fn score_candidates(
        &self,
        embedding: &[f32],
        now: DateTime<Utc>,
    ) -> NewsflowResult<Vec<Candidate>> {
        let hits = self.index.search(embedding, self.config.top_k)?;

        let mut candidates = Vec::with_capacity(hits.len());
        for hit in hits {
            // The index is a shortlist only; the store owns the truth. An
            // issue missing from the store is a stale index entry, skipped.
            let Some(issue) = self.store.get_issue(hit.issue_id)? else {
                warn!(issue_id = hit.issue_id, "index hit with no issue row, skipping");
                continue;
            };
            self.validate_issue(&issue)?;

            let similarity = scoring::cosine_similarity(embedding, &issue.centroid);
            let time_weight =
                scoring::time_decay_weight(issue.updated_at, now, self.config.lambda_per_hour);
            let score = scoring::composite_score(
                similarity,
                time_weight,
                self.config.alpha,
                self.config.beta,
            );
            let threshold = scoring::dynamic_threshold(time_weight, self.config.base_threshold);

            candidates.push(Candidate {
                issue,
                similarity,
                time_weight,
                score,
                threshold,
            });
        }
        Ok(candidates)
    }

    fn validate_issue(&self, issue: &Issue) -> NewsflowResult<()> {
        if issue.article_count < 1 {
            return Err(NewsflowError::InvariantViolation {
                reason: format!(
                    "issue {} has article_count {}",
                    issue.id, issue.article_count
                ),
            });
        }
        centroid::validate_vector(&issue.centroid, self.embedding_dim, "issue centroid")
    }

    /// Merge into the chosen issue, retrying the optimistic centroid update
    /// with fresh issue state for a bounded number of attempts.
    fn merge(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        best: Candidate,
        sep: f64,
        now: DateTime<Utc>,
        deadline: &Deadline,
    ) -> NewsflowResult<Decision> {
        let mut issue = best.issue;
        let attempts = self.config.conflict_retry_budget + 1;

        for attempt in 0..attempts {
            deadline.check(PipelineStage::Merged)?;
            let new_centroid =
                centroid::merge_centroid(&issue.centroid, issue.article_count, embedding)?;

            match self.store.merge_article(
                draft,
                embedding,
                issue.id,
                issue.article_count,
                &new_centroid,
                now,
            ) {
                Ok((issue, article)) => {
                    // The committed row is authoritative; the index copy is
                    // reconciled from it. Once the transaction has landed,
                    // an index failure must not fail the article.
                    if let Err(e) = self
                        .index
                        .upsert(issue.id, &issue.centroid, issue.updated_at)
                    {
                        warn!(issue_id = issue.id, error = %e, "vector index upsert failed after commit");
                    }
                    info!(
                        issue_id = issue.id,
                        article_id = article.id,
                        article_count = issue.article_count,
                        score = best.score,
                        "merged article into issue"
                    );
                    return Ok(Decision::Merged {
                        issue,
                        article,
                        similarity: best.similarity,
                        score: best.score,
                        separability: sep,
                    });
                }
                Err(NewsflowError::Storage(StorageError::Conflict { .. })) => {
                    debug!(
                        issue_id = issue.id,
                        attempt, "centroid update lost the race, reloading issue"
                    );
                    issue = self.store.get_issue(issue.id)?.ok_or_else(|| {
                        NewsflowError::InvariantViolation {
                            reason: format!("issue {} disappeared during merge retry", issue.id),
                        }
                    })?;
                }
                Err(e) => return Err(e),
            }
        }

        Err(NewsflowError::ConflictExhausted {
            issue_id: issue.id,
            attempts,
        })
    }

    fn create(
        &self,
        draft: &ArticleDraft,
        embedding: &[f32],
        now: DateTime<Utc>,
        deadline: &Deadline,
    ) -> NewsflowResult<Decision> {
        deadline.check(PipelineStage::Created)?;
        let (issue, article) = self.store.create_issue(draft, embedding, now)?;
        if let Err(e) = self
            .index
            .upsert(issue.id, &issue.centroid, issue.updated_at)
        {
            warn!(issue_id = issue.id, error = %e, "vector index upsert failed after commit");
        }
        info!(
            issue_id = issue.id,
            article_id = article.id,
            "opened new issue"
        );
        Ok(Decision::Created { issue, article })
    }

    /// Poison errors are logged and routed to the dead-letter table;
    /// everything else propagates for the caller to retry.
    fn route_poison(
        &self,
        draft: &ArticleDraft,
        result: NewsflowResult<Decision>,
    ) -> NewsflowResult<Decision> {
        match result {
            Err(e) if e.is_poison() => {
                error!(title_hash = %draft.title_hash, error = %e, "poison article dead-lettered");
                let payload = serde_json::to_string(draft).unwrap_or_default();
                if let Err(dl) =
                    self.store
                        .record_dead_letter(&draft.title_hash, &payload, &e.to_string())
                {
                    warn!(error = %dl, "failed to record dead letter");
                }
                Err(e)
            }
            other => other,
        }
    }
}
