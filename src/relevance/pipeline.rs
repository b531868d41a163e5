use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::error::RelevanceError;
use super::evaluator::RelevanceEvaluator;
use super::types::{EvaluatedPost, EvaluationRequest, SearchMethod};
use crate::llm::LanguageModel;
use crate::reddit::{ContentSource, Post};

/// Topic embedding, per-subreddit retrieval and per-post evaluation.
///
/// Runs are sequential and fail-fast: the first error discards every result
/// gathered so far. The pipeline keeps no state between runs, so one instance
/// can serve concurrent runs.
pub struct RelevancePipeline<C, L> {
    source: C,
    llm: L,
}

impl<C, L> std::fmt::Debug for RelevancePipeline<C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevancePipeline").finish_non_exhaustive()
    }
}

impl<C: ContentSource, L: LanguageModel> RelevancePipeline<C, L> {
    pub fn new(source: C, llm: L) -> Self {
        Self { source, llm }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Evaluates every retrieved post, ordered by subreddit then retrieval order.
    pub async fn run(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<EvaluatedPost>, RelevanceError> {
        let span = info_span!(
            "relevance_run",
            run_id = %Uuid::new_v4(),
            topic = %request.topic,
            search_method = %request.search_method,
            subreddits = request.subreddits.len(),
        );

        self.run_inner(request).instrument(span).await
    }

    /// Like [`run`](Self::run), but aborts with [`RelevanceError::Cancelled`]
    /// as soon as `cancel` completes.
    pub async fn run_until<F>(
        &self,
        request: &EvaluationRequest,
        cancel: F,
    ) -> Result<Vec<EvaluatedPost>, RelevanceError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                warn!(topic = %request.topic, "Relevance run cancelled");
                Err(RelevanceError::Cancelled)
            }
            result = self.run(request) => result,
        }
    }

    /// Like [`run`](Self::run), but aborts with
    /// [`RelevanceError::DeadlineExceeded`] after `timeout`.
    pub async fn run_with_deadline(
        &self,
        request: &EvaluationRequest,
        timeout: Duration,
    ) -> Result<Vec<EvaluatedPost>, RelevanceError> {
        match tokio::time::timeout(timeout, self.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(topic = %request.topic, ?timeout, "Relevance run exceeded deadline");
                Err(RelevanceError::DeadlineExceeded { timeout })
            }
        }
    }

    async fn run_inner(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Vec<EvaluatedPost>, RelevanceError> {
        let started = Instant::now();
        info!(threshold = request.threshold, limit = request.limit, "Getting relevant posts");

        let topic_embedding = self
            .llm
            .embed(&request.topic)
            .await
            .map_err(RelevanceError::TopicEmbedding)
            .inspect_err(|e| error!(error = %e, "Topic embedding failed"))?;

        let evaluator = RelevanceEvaluator::new(&self.llm);
        let mut evaluated = Vec::new();

        for subreddit in &request.subreddits {
            let posts = self
                .retrieve(subreddit, request)
                .await
                .inspect_err(|e| error!(error = %e, "Retrieval failed"))?;
            let retrieved = posts.len();
            let posts = request.filter.apply(posts);

            debug!(
                subreddit = %subreddit,
                retrieved,
                kept = posts.len(),
                "Evaluating subreddit posts"
            );

            // Posts from this subreddit only join the output once all of them succeed.
            let mut batch = Vec::with_capacity(posts.len());
            for post in posts {
                let result = evaluator
                    .evaluate(&post, &request.topic, &topic_embedding, request.threshold)
                    .await
                    .map_err(|source| RelevanceError::Evaluation {
                        subreddit: subreddit.clone(),
                        title: post.title.clone(),
                        source,
                    })
                    .inspect_err(|e| error!(error = %e, "Post evaluation failed"))?;

                batch.push(EvaluatedPost {
                    subreddit_name: subreddit.clone(),
                    post,
                    result,
                });
            }

            evaluated.extend(batch);
        }

        info!(
            posts = evaluated.len(),
            relevant = evaluated.iter().filter(|p| p.result.is_relevant).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Relevance run complete"
        );

        Ok(evaluated)
    }

    async fn retrieve(
        &self,
        subreddit: &str,
        request: &EvaluationRequest,
    ) -> Result<Vec<Post>, RelevanceError> {
        let result = match request.search_method {
            SearchMethod::Search => {
                self.source
                    .search(subreddit, &request.topic, request.limit)
                    .await
            }
            SearchMethod::Latest => self.source.list_latest(subreddit, request.limit).await,
        };

        result.map_err(|source| RelevanceError::Retrieval {
            subreddit: subreddit.to_string(),
            source,
        })
    }
}
