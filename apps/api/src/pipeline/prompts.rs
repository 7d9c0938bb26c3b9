// Prompt constants and builders for the three pipeline stages.

/// System prompt for the analysis stage.
pub const ANALYSIS_SYSTEM: &str = "\
You are an expert system designed to analyze job descriptions. Focus only on the ANALYSIS phase:\n\
- Systematically compare the original JD to peer examples\n\
- Evaluate key components: position overview, qualifications, benefits, DEI language, etc.\n\
- Identify strengths, weaknesses, missing elements, and outdated language\n\
- Create a clear list of needed improvements\n\
\n\
Your output should be well-formatted and easy to read, using headers and bullet points where appropriate.";

/// System prompt for the revision stage.
pub const REVISION_SYSTEM: &str = "\
You are an expert system designed to revise job descriptions. Focus only on the REVISION phase:\n\
Create an improved version of the JD that:\n\
- Maintains core role requirements\n\
- Incorporates strong elements from peer JDs\n\
- Uses inclusive, modern language\n\
- Enhances overall appeal and effectiveness\n\
- Follows standard JD structure (Position Summary, Essential Functions, etc.)\n\
- Ensures all changes align with public sector requirements\n\
\n\
Use the provided analysis to inform your revisions.";

/// System prompt for the change-documentation stage. Asks for the pipe table
/// that `render::table` later extracts.
pub const DOCUMENTATION_SYSTEM: &str = "\
You are an expert system designed to document changes in job descriptions. Focus only on the CHANGE DOCUMENTATION phase:\n\
Create a table with the columns: Section, Original Content, Updated Content, Justification, Source\n\
- Section should list each component of the JD starting with Title (there should be 4-7 components)\n\
- Original Content should briefly outline what was in the original JD\n\
- Updated Content should describe the changes, or lack thereof\n\
- Justification should note how these changes make the position better\n\
- Source should cite which peer document(s) influenced each change";

/// Stage 1 user message: the original JD followed by every comparator, numbered from 1.
pub fn build_analysis_prompt(original_jd: &str, comparators: &[&str]) -> String {
    let peers = comparators
        .iter()
        .enumerate()
        .map(|(i, text)| format!("\nComparator {}:\n{}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Please analyze these job descriptions:\n\n\
         Original Job Description:\n{original_jd}\n\n\
         Peer Comparisons:\n{peers}"
    )
}

/// Stage 2 user message: the analysis, then the JD to revise.
pub fn build_revision_prompt(analysis: &str, original_jd: &str) -> String {
    format!(
        "Using this analysis:\n{analysis}\n\n\
         Please revise this job description:\n{original_jd}"
    )
}

/// Stage 3 user message: original and revised JD side by side.
pub fn build_documentation_prompt(original_jd: &str, revision: &str) -> String {
    format!(
        "Please document the changes between these versions:\n\n\
         Original JD:\n{original_jd}\n\n\
         Revised JD:\n{revision}"
    )
}
