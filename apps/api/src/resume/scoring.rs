//! Completion and quality scoring for a résumé draft.
//!
//! Progress is a weighted sum of points per section. Section caps are applied
//! to the running total in [`ScoringMode::Cumulative`] (the long-standing
//! behaviour, kept for compatibility). [`ScoringMode::PerSection`] caps each
//! section's own subtotal instead.

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;
use crate::resume::validation::{char_len, validate_resume};

const MAX_SCORE: u32 = 100;
const EXPERIENCE_CAP: u32 = 30;
const EDUCATION_CAP: u32 = 15;

pub const FEEDBACK_EXCELLENT: &str = "Excellent! Your resume is well-complete.";
pub const FEEDBACK_GOOD: &str = "Good progress! A few more details would make it perfect.";
pub const FEEDBACK_HALFWAY: &str = "You're halfway there! Keep adding more information.";
pub const FEEDBACK_STARTING: &str = "Getting started! Add more details to strengthen your resume.";

pub const SUGGEST_PROFILES: &str = "Add LinkedIn or GitHub profile to increase visibility";
pub const SUGGEST_EXPERIENCE: &str = "Add your work experience to showcase your expertise";
pub const SUGGEST_BULLETS: &str = "Add bullet points to your experience entries for better impact";
pub const SUGGEST_SKILLS: &str = "Add more skills to demonstrate your technical expertise";
pub const SUGGEST_SUMMARY: &str =
    "Expand your professional summary to make a stronger first impression";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Caps compare against the running total, so a full personal/summary
    /// block leaves little room for experience and education.
    #[default]
    Cumulative,
    PerSection,
}

impl std::str::FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" => Ok(ScoringMode::Cumulative),
            "per_section" | "per-section" => Ok(ScoringMode::PerSection),
            other => Err(format!("unknown scoring mode '{other}'")),
        }
    }
}

/// Uncapped points earned by each section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionPoints {
    pub personal_info: u32,
    pub summary: u32,
    /// `None` when there are no entries; the section contributes nothing and
    /// its cap is never applied.
    pub experience: Option<u32>,
    pub education: Option<u32>,
    pub skills: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeQuality {
    pub score: u32,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
}

pub fn section_points(data: &ResumeData) -> SectionPoints {
    let info = &data.personal_info;
    let mut personal_info = 0;
    if !info.name.is_empty() {
        personal_info += 5;
    }
    if !info.title.is_empty() {
        personal_info += 5;
    }
    if !info.email.is_empty() {
        personal_info += 5;
    }
    if !info.phone.is_empty() {
        personal_info += 3;
    }
    if !info.location.is_empty() {
        personal_info += 2;
    }
    if !info.linkedin.is_empty() || !info.github.is_empty() {
        personal_info += 5;
    }

    let summary = if char_len(&data.summary) > 50 { 15 } else { 0 };

    let experience = (!data.experience.is_empty()).then(|| {
        10 + data
            .experience
            .iter()
            .map(|exp| {
                let mut points = 0;
                if !exp.role.is_empty() && !exp.company.is_empty() {
                    points += 5;
                }
                if !exp.start_date.is_empty() {
                    points += 2;
                }
                if !exp.bullets.is_empty() || !exp.description.is_empty() {
                    points += 3;
                }
                points
            })
            .sum::<u32>()
    });

    let education = (!data.education.is_empty()).then(|| {
        5 + data
            .education
            .iter()
            .filter(|edu| !edu.degree.is_empty() && !edu.institution.is_empty())
            .count() as u32
            * 5
    });

    let skills = match data.skills.len() {
        n if n >= 5 => 15,
        n if n >= 3 => 10,
        n if n >= 1 => 5,
        _ => 0,
    };

    SectionPoints {
        personal_info,
        summary,
        experience,
        education,
        skills,
    }
}

/// Completion percentage in `0..=100` using the default (cumulative) mode.
pub fn calculate_resume_progress(data: &ResumeData) -> u32 {
    calculate_resume_progress_with(data, ScoringMode::default())
}

pub fn calculate_resume_progress_with(data: &ResumeData, mode: ScoringMode) -> u32 {
    let points = section_points(data);

    let score = match mode {
        ScoringMode::Cumulative => {
            let mut score = points.personal_info + points.summary;
            if let Some(experience) = points.experience {
                score = (score + experience).min(EXPERIENCE_CAP);
            }
            if let Some(education) = points.education {
                score = (score + education).min(EDUCATION_CAP);
            }
            score + points.skills
        }
        ScoringMode::PerSection => {
            points.personal_info
                + points.summary
                + points.experience.unwrap_or(0).min(EXPERIENCE_CAP)
                + points.education.unwrap_or(0).min(EDUCATION_CAP)
                + points.skills
        }
    };

    score.min(MAX_SCORE)
}

pub fn get_resume_quality(data: &ResumeData) -> ResumeQuality {
    get_resume_quality_with(data, ScoringMode::default())
}

pub fn get_resume_quality_with(data: &ResumeData, mode: ScoringMode) -> ResumeQuality {
    let progress = calculate_resume_progress_with(data, mode);
    let errors = validate_resume(data);

    let mut score = progress;
    if errors.is_empty() {
        score += 10;
    }
    if data.experience.len() >= 2 {
        score += 5;
    }
    if data.skills.len() >= 10 {
        score += 5;
    }
    let score = score.min(MAX_SCORE);

    let feedback = match progress {
        p if p >= 90 => FEEDBACK_EXCELLENT,
        p if p >= 70 => FEEDBACK_GOOD,
        p if p >= 50 => FEEDBACK_HALFWAY,
        _ => FEEDBACK_STARTING,
    };

    let info = &data.personal_info;
    let checks = [
        (
            info.linkedin.is_empty() && info.github.is_empty(),
            SUGGEST_PROFILES,
        ),
        (data.experience.is_empty(), SUGGEST_EXPERIENCE),
        (
            data.experience.iter().any(|exp| exp.bullets.is_empty()),
            SUGGEST_BULLETS,
        ),
        (data.skills.len() < 5, SUGGEST_SKILLS),
        (char_len(&data.summary) < 100, SUGGEST_SUMMARY),
    ];
    let suggestions = checks
        .into_iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, message)| message.to_string())
        .collect();

    ResumeQuality {
        score,
        feedback: vec![feedback.to_string()],
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience};

    fn skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("skill-{i}")).collect()
    }

    /// Name, email, title, a 60-char summary, one complete experience,
    /// one complete education entry and three skills.
    fn minimal_valid() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_info.name = "Ada Lovelace".to_string();
        data.personal_info.email = "ada@example.com".to_string();
        data.personal_info.title = "Engineer".to_string();
        data.summary = "s".repeat(60);
        data.experience.push(Experience {
            role: "Engineer".to_string(),
            company: "Analytical Engines".to_string(),
            start_date: "Jan 2020".to_string(),
            bullets: vec!["Computed Bernoulli numbers".to_string()],
            ..Experience::new("e1".to_string())
        });
        data.education.push(Education {
            degree: "BSc".to_string(),
            institution: "London".to_string(),
            ..Education::new("d1".to_string())
        });
        data.skills = skills(3);
        data
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let data = ResumeData::default();
        assert_eq!(calculate_resume_progress(&data), 0);
        assert_eq!(
            calculate_resume_progress_with(&data, ScoringMode::PerSection),
            0
        );
    }

    #[test]
    fn test_minimal_valid_resume_cumulative() {
        // 15 personal + 15 summary + 20 experience → capped at 30,
        // + 10 education → capped at 15, + 10 skills.
        let data = minimal_valid();
        assert!(validate_resume(&data).is_empty());
        assert_eq!(calculate_resume_progress(&data), 25);
    }

    #[test]
    fn test_minimal_valid_resume_per_section() {
        let data = minimal_valid();
        assert_eq!(
            calculate_resume_progress_with(&data, ScoringMode::PerSection),
            70
        );
    }

    #[test]
    fn test_personal_info_points() {
        let mut data = ResumeData::default();
        data.personal_info.name = "n".into();
        data.personal_info.title = "t".into();
        data.personal_info.email = "e".into();
        data.personal_info.phone = "p".into();
        data.personal_info.location = "l".into();
        data.personal_info.github = "g".into();
        assert_eq!(calculate_resume_progress(&data), 25);
        data.personal_info.linkedin = "l".into();
        assert_eq!(calculate_resume_progress(&data), 25);
    }

    #[test]
    fn test_summary_needs_more_than_fifty_chars() {
        let mut data = ResumeData::default();
        data.summary = "s".repeat(50);
        assert_eq!(calculate_resume_progress(&data), 0);
        data.summary.push('s');
        assert_eq!(calculate_resume_progress(&data), 15);
    }

    #[test]
    fn test_skill_tiers() {
        let mut data = ResumeData::default();
        for (n, expected) in [(0, 0), (1, 5), (2, 5), (3, 10), (4, 10), (5, 15), (20, 15)] {
            data.skills = skills(n);
            assert_eq!(calculate_resume_progress(&data), expected, "{n} skills");
        }
    }

    #[test]
    fn test_experience_cap_is_cumulative() {
        let mut data = ResumeData::default();
        data.experience = (0..5)
            .map(|i| Experience {
                role: "r".into(),
                company: "c".into(),
                ..Experience::new(format!("e{i}"))
            })
            .collect();
        // 10 + 5*5 = 35 → 30.
        assert_eq!(calculate_resume_progress(&data), 30);

        data.personal_info.name = "n".into();
        data.personal_info.title = "t".into();
        // Running total is already 10 before experience; still capped at 30.
        assert_eq!(calculate_resume_progress(&data), 30);
        assert_eq!(
            calculate_resume_progress_with(&data, ScoringMode::PerSection),
            40
        );
    }

    #[test]
    fn test_education_cap_swallows_earlier_sections() {
        let mut data = minimal_valid();
        data.skills.clear();
        // 30 after experience, +10 education → capped at 15.
        assert_eq!(calculate_resume_progress(&data), 15);
        data.education.clear();
        assert_eq!(calculate_resume_progress(&data), 30);
    }

    #[test]
    fn test_progress_is_bounded() {
        let mut data = minimal_valid();
        data.personal_info.phone = "p".into();
        data.personal_info.location = "l".into();
        data.personal_info.linkedin = "l".into();
        data.skills = skills(30);
        data.experience = (0..10)
            .map(|i| Experience {
                role: "r".into(),
                company: "c".into(),
                start_date: "s".into(),
                description: "d".into(),
                ..Experience::new(format!("e{i}"))
            })
            .collect();
        data.education.push(Education {
            degree: "MSc".into(),
            institution: "Cambridge".into(),
            ..Education::new("d2".into())
        });
        for mode in [ScoringMode::Cumulative, ScoringMode::PerSection] {
            let progress = calculate_resume_progress_with(&data, mode);
            assert!(progress <= 100);
            assert!(get_resume_quality_with(&data, mode).score <= 100);
        }
        assert_eq!(
            calculate_resume_progress_with(&data, ScoringMode::PerSection),
            100
        );
    }

    #[test]
    fn test_removing_a_lone_field_never_increases_progress() {
        let mut named = ResumeData::default();
        named.personal_info.name = "Ada".to_string();
        let mut summarised = ResumeData::default();
        summarised.summary = "s".repeat(60);
        let mut employed = ResumeData::default();
        employed.experience = minimal_valid().experience;
        let mut schooled = ResumeData::default();
        schooled.education = minimal_valid().education;
        let mut skilled = ResumeData::default();
        skilled.skills = skills(1);

        for mode in [ScoringMode::Cumulative, ScoringMode::PerSection] {
            let empty = calculate_resume_progress_with(&ResumeData::default(), mode);
            for (field, data) in [
                ("name", &named),
                ("summary", &summarised),
                ("experience", &employed),
                ("education", &schooled),
                ("skills", &skilled),
            ] {
                let with = calculate_resume_progress_with(data, mode);
                assert!(with > 0, "{mode:?}: {field} alone scores nothing");
                assert!(empty <= with, "{mode:?}: removing {field} raised {with} to {empty}");
            }
        }
    }

    #[test]
    fn test_adding_skills_never_decreases_progress() {
        let mut data = minimal_valid();
        data.skills.clear();
        let mut last = calculate_resume_progress(&data);
        for n in 1..12 {
            data.skills = skills(n);
            let now = calculate_resume_progress(&data);
            assert!(now >= last, "{n} skills: {now} < {last}");
            last = now;
        }
    }

    #[test]
    fn test_quality_of_empty_resume() {
        let quality = get_resume_quality(&ResumeData::default());
        assert_eq!(quality.score, 0);
        assert_eq!(quality.feedback, vec![FEEDBACK_STARTING]);
        assert_eq!(
            quality.suggestions,
            vec![
                SUGGEST_PROFILES,
                SUGGEST_EXPERIENCE,
                SUGGEST_SKILLS,
                SUGGEST_SUMMARY
            ]
        );
    }

    #[test]
    fn test_quality_bonuses() {
        let mut data = minimal_valid();
        // 25 progress + 10 for no errors.
        assert_eq!(get_resume_quality(&data).score, 35);

        data.experience.push(Experience {
            id: "e2".to_string(),
            ..data.experience[0].clone()
        });
        data.skills = skills(10);
        // Progress rises to 30 with the top skill tier.
        assert_eq!(calculate_resume_progress(&data), 30);
        assert_eq!(get_resume_quality(&data).score, 30 + 10 + 5 + 5);
    }

    #[test]
    fn test_quality_feedback_thresholds_follow_progress() {
        let mut data = minimal_valid();
        data.personal_info.linkedin = "l".into();
        data.personal_info.phone = "p".into();
        data.personal_info.location = "l".into();
        data.skills = skills(5);
        // Per-section: 25 + 15 + 20 + 10 + 15 = 85.
        let quality = get_resume_quality_with(&data, ScoringMode::PerSection);
        assert_eq!(quality.feedback, vec![FEEDBACK_GOOD]);
        assert_eq!(quality.score, 95);
        assert_eq!(quality.suggestions, vec![SUGGEST_SUMMARY]);
    }

    #[test]
    fn test_bullet_suggestion_when_any_entry_lacks_bullets() {
        let mut data = minimal_valid();
        data.experience.push(Experience {
            description: "Only prose".into(),
            ..Experience::new("e2".into())
        });
        let quality = get_resume_quality(&data);
        assert!(quality.suggestions.contains(&SUGGEST_BULLETS.to_string()));
    }

    #[test]
    fn test_scoring_mode_from_str() {
        assert_eq!("cumulative".parse(), Ok(ScoringMode::Cumulative));
        assert_eq!("Per_Section".parse(), Ok(ScoringMode::PerSection));
        assert!("linear".parse::<ScoringMode>().is_err());
    }
}
