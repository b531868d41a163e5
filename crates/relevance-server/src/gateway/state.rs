use std::sync::Arc;
use std::time::Duration;

use relevance::llm::LanguageModel;
use relevance::reddit::ContentSource;
use relevance::relevance::RelevancePipeline;

pub struct HandlerState<C, L> {
    pub pipeline: Arc<RelevancePipeline<C, L>>,

    /// Deadline for one evaluation run; `None` lets runs take as long as they need.
    pub request_timeout: Option<Duration>,
}

impl<C, L> Clone for HandlerState<C, L> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            request_timeout: self.request_timeout,
        }
    }
}

impl<C, L> HandlerState<C, L>
where
    C: ContentSource + 'static,
    L: LanguageModel + 'static,
{
    pub fn new(pipeline: Arc<RelevancePipeline<C, L>>, request_timeout: Option<Duration>) -> Self {
        Self {
            pipeline,
            request_timeout,
        }
    }

    pub fn from_parts(source: C, llm: L) -> Self {
        Self::new(Arc::new(RelevancePipeline::new(source, llm)), None)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
