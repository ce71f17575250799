//! Domain model: articles, issues, scored candidates, decisions.

mod article;
mod candidate;
mod decision;
mod issue;

pub use article::{Article, ArticleDraft};
pub use candidate::Candidate;
pub use decision::{Decision, PipelineStage};
pub use issue::Issue;
