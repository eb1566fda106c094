//! Terminal and JSON output for the generator state.

use crate::error::Result;
use crate::tasks::controller::GeneratorState;
use crate::tasks::decoder::TaskRecord;

/// Render the state as terminal text: the error line, then the suggested tasks.
pub fn render_text(state: &GeneratorState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    if !state.tasks.is_empty() {
        out.push_str("Suggested Tasks\n");
        for (index, task) in state.tasks.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, task.title));
            out.push_str(&format!("   {}\n", task.description));
        }
    }

    out
}

pub fn render_json(tasks: &[TaskRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}
