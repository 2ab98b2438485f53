//! Common test utilities for workflow tests.

use workflow_tests::WorkflowTestContext;

/// Create a workflow test context with a healthy server.
pub async fn setup() -> WorkflowTestContext {
    WorkflowTestContext::new()
        .await
        .expect("Failed to create workflow test context")
}

/// Number of pages in a saved PDF.
pub fn page_count(path: &std::path::Path) -> usize {
    lopdf::Document::load(path)
        .expect("Saved file is not a valid PDF")
        .get_pages()
        .len()
}
