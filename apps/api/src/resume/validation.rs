use crate::models::resume::ResumeData;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const TITLE_REQUIRED: &str = "Professional title is required";
pub const EXPERIENCE_RECOMMENDED: &str = "At least one work experience is recommended";
pub const EDUCATION_RECOMMENDED: &str = "At least one education entry is recommended";
pub const SKILLS_MINIMUM: &str = "Add at least 3 skills";
pub const SUMMARY_MINIMUM: &str = "Professional summary should be at least 50 characters";

/// Minimum summary length, in characters, for a valid résumé.
pub const MIN_SUMMARY_CHARS: usize = 50;
pub const MIN_SKILLS: usize = 3;

/// Returns the blocking problems with a draft, in a fixed display order.
/// An empty list means the résumé is valid.
pub fn validate_resume(data: &ResumeData) -> Vec<String> {
    let info = &data.personal_info;
    let checks = [
        (info.name.is_empty(), NAME_REQUIRED),
        (info.email.is_empty(), EMAIL_REQUIRED),
        (info.title.is_empty(), TITLE_REQUIRED),
        (data.experience.is_empty(), EXPERIENCE_RECOMMENDED),
        (data.education.is_empty(), EDUCATION_RECOMMENDED),
        (data.skills.len() < MIN_SKILLS, SKILLS_MINIMUM),
        (char_len(&data.summary) < MIN_SUMMARY_CHARS, SUMMARY_MINIMUM),
    ];

    checks
        .into_iter()
        .filter(|(failed, _)| *failed)
        .map(|(_, message)| message.to_string())
        .collect()
}

pub fn is_valid(data: &ResumeData) -> bool {
    validate_resume(data).is_empty()
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
