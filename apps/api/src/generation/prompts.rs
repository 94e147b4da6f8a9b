// Prompt builders for each generation request.

use crate::models::resume::{Experience, ResumeData};

pub const SUMMARY_MAX_TOKENS: u32 = 150;
pub const BULLETS_MAX_TOKENS: u32 = 300;
pub const SKILLS_MAX_TOKENS: u32 = 200;

/// Skills beyond this many are left out of the summary prompt.
const SUMMARY_SKILL_LIMIT: usize = 10;

pub fn summary_prompt(data: &ResumeData) -> String {
    let info = &data.personal_info;
    let target = data
        .job_title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&info.title);
    let skills: Vec<&str> = data
        .skills
        .iter()
        .take(SUMMARY_SKILL_LIMIT)
        .map(String::as_str)
        .collect();

    format!(
        "Write a professional resume summary of two to three sentences.\n\n\
         Name: {}\n\
         Title: {}\n\
         Target role: {}\n\
         Key skills: {}\n\
         Positions held: {}\n\n\
         Keep it compelling and tailored to the target role.",
        info.name,
        info.title,
        target,
        skills.join(", "),
        data.experience.len()
    )
}

pub fn bullets_prompt(experience: &Experience) -> String {
    format!(
        "Write 4-5 results-oriented resume bullet points for this position. \
         Start each with an action verb and quantify achievements where possible.\n\n\
         Role: {}\n\
         Company: {}\n\
         Period: {} - {}\n\
         Current description: {}\n\n\
         Respond with a JSON array of strings, one concise bullet per element.",
        experience.role,
        experience.company,
        experience.start_date,
        experience.end_date,
        experience.description
    )
}

pub fn skills_prompt(skills: &[String]) -> String {
    format!(
        "Refine this resume skill list: group related skills, drop duplicates and use \
         professional naming. Respond with one skill per line, without numbering or bullets.\n\n\
         Current skills: {}",
        skills.join(", ")
    )
}
