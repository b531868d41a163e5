use tracing::{debug, info};

use super::error::EvaluationError;
use super::prompt::{SummaryContext, evaluation_text, summary_prompt};
use super::types::RelevanceResult;
use crate::llm::{ChatMessage, LanguageModel};
use crate::reddit::Post;
use crate::similarity::cosine_similarity;

/// Scores and explains one post against a precomputed topic embedding.
pub struct RelevanceEvaluator<'a, L> {
    llm: &'a L,
}

impl<'a, L: LanguageModel> RelevanceEvaluator<'a, L> {
    pub fn new(llm: &'a L) -> Self {
        Self { llm }
    }

    /// Embeds the post, classifies it with `score >= threshold`, then asks the
    /// chat model for an explanation. The explanation is generated for
    /// irrelevant posts too.
    pub async fn evaluate(
        &self,
        post: &Post,
        topic: &str,
        topic_embedding: &[f32],
        threshold: f64,
    ) -> Result<RelevanceResult, EvaluationError> {
        let score = self.score(post, topic_embedding).await?;
        let is_relevant = score >= threshold;

        let explanation = self
            .explain(&SummaryContext {
                topic,
                threshold,
                is_relevant,
                score,
                title: &post.title,
                body: &post.body,
            })
            .await?;

        Ok(RelevanceResult {
            score,
            is_relevant,
            explanation,
        })
    }

    async fn score(&self, post: &Post, topic_embedding: &[f32]) -> Result<f64, EvaluationError> {
        let text = evaluation_text(&post.title, &post.body);
        let embedding = self
            .llm
            .embed(&text)
            .await
            .map_err(EvaluationError::Embedding)?;

        if embedding.len() != topic_embedding.len() {
            debug!(
                item_dim = embedding.len(),
                topic_dim = topic_embedding.len(),
                "Embedding dimensions differ; similarity is 0"
            );
        }

        let score = cosine_similarity(&embedding, topic_embedding);
        info!(title = %post.title, cosine_similarity = score, "Relevance score calculated");
        Ok(score)
    }

    async fn explain(&self, ctx: &SummaryContext<'_>) -> Result<String, EvaluationError> {
        debug!(
            title = %ctx.title,
            relevance_score = ctx.score,
            is_relevant = ctx.is_relevant,
            "Getting relevance summary"
        );

        let messages = [ChatMessage::user(summary_prompt(ctx))];
        self.llm
            .chat(&messages)
            .await
            .map_err(EvaluationError::Generation)
    }
}
