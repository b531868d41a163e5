//! Texts sent to the language model.

/// Text embedded for a post: `"<title>. <body>"`, separator kept for empty bodies.
pub fn evaluation_text(title: &str, body: &str) -> String {
    format!("{title}. {body}")
}

/// Inputs for [`summary_prompt`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    pub topic: &'a str,
    pub threshold: f64,
    pub is_relevant: bool,
    pub score: f64,
    pub title: &'a str,
    pub body: &'a str,
}

/// Prompt asking for a single-sentence relevance explanation.
pub fn summary_prompt(ctx: &SummaryContext<'_>) -> String {
    format!(
        "Given the following title, content, and topic, generate an explanation of the relevance \
of the content to the topic. The explanation should be a single sentence.

# Topic: \"{topic}\"
# Relevance Threshold: {threshold:.6}
# Is Relevant: {is_relevant}
# Relevance Score: {score:.6}

Reddit Post:

# Title: \"{title}\"
# Content:
{body}
",
        topic = ctx.topic,
        threshold = ctx.threshold,
        is_relevant = ctx.is_relevant,
        score = ctx.score,
        title = ctx.title,
        body = ctx.body,
    )
}
