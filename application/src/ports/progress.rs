//! Progress notification port
//!
//! Lets the presentation layer surface run progress without the use
//! cases knowing how it is displayed.

/// Observer for team run progress
pub trait ProgressNotifier: Send + Sync {
    /// A member is about to run. `index` is zero-based.
    fn on_member_start(&self, team: &str, agent: &str, index: usize, total: usize);

    /// A tool call finished
    fn on_tool_call(&self, agent: &str, tool: &str, success: bool);

    /// A member attempt failed and will be retried
    fn on_retry(&self, agent: &str, attempt: u32);

    /// A member finished, successfully or not
    fn on_member_complete(&self, agent: &str, success: bool, attempts: u32);
}

/// No-op notifier for headless runs and tests
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_member_start(&self, _team: &str, _agent: &str, _index: usize, _total: usize) {}
    fn on_tool_call(&self, _agent: &str, _tool: &str, _success: bool) {}
    fn on_retry(&self, _agent: &str, _attempt: u32) {}
    fn on_member_complete(&self, _agent: &str, _success: bool, _attempts: u32) {}
}
