// Prompt fragments shared by every generation request.

/// System message for all résumé-writing calls.
pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer. \
    Generate concise, impactful, and results-oriented content for resumes.";
