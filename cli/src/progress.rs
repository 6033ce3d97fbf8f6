//! Console progress reporting for team runs

use estate_application::ProgressNotifier;

/// Prints run progress to stderr so stdout stays clean for the answer
pub struct ConsoleProgress;

impl ProgressNotifier for ConsoleProgress {
    fn on_member_start(&self, team: &str, agent: &str, index: usize, total: usize) {
        eprintln!("[{}/{}] {} ({})", index + 1, total, agent, team);
    }

    fn on_tool_call(&self, _agent: &str, tool: &str, success: bool) {
        let marker = if success { "ok" } else { "failed" };
        eprintln!("      tool {} ... {}", tool, marker);
    }

    fn on_retry(&self, agent: &str, attempt: u32) {
        eprintln!("      {} attempt {} failed, retrying", agent, attempt);
    }

    fn on_member_complete(&self, agent: &str, success: bool, attempts: u32) {
        if success {
            if attempts > 1 {
                eprintln!("      {} done after {} attempts", agent, attempts);
            }
        } else {
            eprintln!("      {} gave up after {} attempts", agent, attempts);
        }
    }
}
