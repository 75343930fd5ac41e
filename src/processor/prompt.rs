//! Prompt construction for the task triage request.
//!
//! The whole batch goes into a single prompt as a numbered list; the
//! model is asked to answer with nothing but a JSON array.

use super::RawTask;

/// System message fixing the model's output discipline.
pub(super) const SYSTEM_PROMPT: &str =
    "You are a precise task management assistant. Always return valid JSON exactly as requested.";

/// Build the composite user prompt enumerating every task in the batch.
pub(super) fn build_prompt(tasks: &[RawTask]) -> String {
    let task_lines = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{}. {}", index + 1, task.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"You are a task management AI assistant. Your job is to process messy, unstructured task descriptions and clean them up.

For each task, you need to:
1. Create a clear, concise summary (1-2 sentences max)
2. Add 1-2 relevant tags from this list: #urgent, #bug-fix, #feature, #frontend, #backend, #client, #meeting, #infrastructure, #security, #testing, #analytics, #mobile, #design, #api, #database, #marketing
3. Assign a priority score from 1-5 where:
   - 1 = Very Low (nice to have, no rush)
   - 2 = Low (can wait a week or two)
   - 3 = Medium (should be done this week)
   - 4 = High (needs attention soon, within 1-2 days)
   - 5 = Critical (urgent, needs immediate attention)

Tasks to process:
{task_lines}

Return ONLY a valid JSON array with this exact structure for each task:
[
  {{
    "id": "original_task_id",
    "summary": "clear summary here",
    "tags": ["#tag1", "#tag2"],
    "priority": 3
  }}
]

Important: Return only the JSON array, no additional text or formatting."##
    )
}
