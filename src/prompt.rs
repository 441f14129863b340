/// System instruction sent with every completion call.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful secretary who excels at summarizing various notes. Be clear and concise.";

/// Delimits the meeting notes inside the summarization prompt.
pub const PROMPT_SECTION_SEPARATOR: &str = "\n###\n";

/// Returned by the summarization stage when the model call fails.
pub const SUMMARY_FALLBACK: &str = "An error occurred while summarizing the meeting notes.";

/// Returned by the file-name stage when the model call fails.
pub const FILE_NAME_FALLBACK: &str = "meeting-notes-summary.txt";

pub const MAX_OUTPUT_TOKENS: i32 = 1024;
pub const TEMPERATURE: f32 = 0.2;

pub fn build_summary_prompt(notes: &str) -> String {
    format!(
        "Please provide a concise summary of the following meeting notes, highlighting key points and action items:{PROMPT_SECTION_SEPARATOR}{notes}{PROMPT_SECTION_SEPARATOR}"
    )
}

/// Few-shot prompt asking for a lowercase, hyphenated `.txt` name.
pub fn build_file_name_prompt(notes: &str) -> String {
    format!(
        "Based on the following meeting notes, suggest a concise and descriptive file name for the summary.\n\
         The file name should be in lowercase, use hyphens instead of spaces, and end with .txt. \
         Avoid using special characters or punctuation other than hyphens.\n\
         Respond with only the file name, without any additional text or explanation.\n\
         Example 1:\n\
         Meeting Notes: 'Discussed project timeline and assigned tasks to team members.'\n\
         Suggested File Name: project-timeline-and-tasks-summary.txt\n\
         Example 2:\n\
         Meeting Notes: 'Reviewed quarterly financial results and planned budget adjustments.'\n\
         Suggested File Name: quarterly-financial-results-and-budget-planning-summary.txt\n\n\
         Meeting Notes: '{notes}'\n\
         Suggested File Name: "
    )
}
