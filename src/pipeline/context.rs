use std::collections::HashMap;

use super::core::StageResult;

/// Bookkeeping for one pipeline execution
///
/// The values flowing between stages are passed directly from one stage to
/// the next; the context only carries what the run needs for logging and
/// reporting: a session id, free-form metadata and the per-stage results.
///
/// # Example
/// ```
/// use folio_lib::pipeline::PipelineContext;
///
/// let mut context = PipelineContext::new("session-123");
/// context.set_metadata("requested_by", "cli");
///
/// assert_eq!(context.session_id(), "session-123");
/// assert_eq!(context.get_metadata("requested_by"), Some("cli"));
/// ```
#[derive(Debug, Clone)]
pub struct PipelineContext {
    session_id: String,

    metadata: HashMap<String, String>,

    stage_results: Vec<StageResult>,

    /// Number of stages declared by the running pipeline
    stage_count: usize,
}

impl PipelineContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            metadata: HashMap::new(),
            stage_results: Vec::new(),
            stage_count: 0,
        }
    }

    /// Create a context with a random v4 session id
    pub fn with_random_session() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    pub fn record_stage(&mut self, result: StageResult) {
        self.stage_results.push(result);
    }

    pub fn stage_results(&self) -> &[StageResult] {
        &self.stage_results
    }

    /// Reset per-run state before a pipeline starts (metadata is kept)
    pub(crate) fn begin(&mut self, pipeline_name: &str, stage_count: usize) {
        self.set_metadata("pipeline_name", pipeline_name);
        self.stage_count = stage_count;
        self.stage_results.clear();
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::with_random_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_context_creation() {
        let context = PipelineContext::new("session-123");
        assert_eq!(context.session_id(), "session-123");
        assert!(context.stage_results().is_empty());
        assert_eq!(context.stage_count(), 0);
    }

    #[test]
    fn test_random_session_is_uuid() {
        let context = PipelineContext::default();
        assert!(uuid::Uuid::parse_str(context.session_id()).is_ok());
    }

    #[test]
    fn test_metadata() {
        let mut context = PipelineContext::new("session-123");
        context.set_metadata("pipeline_name", "test-pipeline");
        context.set_metadata("version", "1.0");

        assert_eq!(context.get_metadata("pipeline_name"), Some("test-pipeline"));
        assert_eq!(context.metadata().len(), 2);
        assert_eq!(context.get_metadata("missing"), None);
    }

    #[test]
    fn test_begin_resets_stage_results() {
        let mut context = PipelineContext::new("session-123");
        context.set_metadata("requested_by", "test");
        context.record_stage(StageResult::success("old", Duration::from_millis(1)));

        context.begin("publish", 5);

        assert!(context.stage_results().is_empty());
        assert_eq!(context.stage_count(), 5);
        assert_eq!(context.get_metadata("pipeline_name"), Some("publish"));
        assert_eq!(context.get_metadata("requested_by"), Some("test"));
    }
}
