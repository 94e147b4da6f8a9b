use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lenient;

/// Contact block at the top of a résumé. Every field is free text; which ones
/// are required is decided by validation, not by the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
}

/// A work history entry.
///
/// When `current` is set, `end_date` is ignored for display but kept verbatim
/// so that unticking `current` restores what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub year: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSection {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub items: Vec<String>,
}

/// The whole résumé document. Always a total value: `ResumeData::default()`
/// is the empty draft, with empty strings and empty collections.
///
/// Array order is display order. Entry ids only identify entries for edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    pub custom_sections: Vec<CustomSection>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_string"
    )]
    pub job_title: Option<String>,
}

impl Experience {
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// End of the period as shown to a reader: "Present" for current roles.
    pub fn display_end(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

impl Education {
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

impl CustomSection {
    pub fn new(id: String) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

impl ResumeData {
    /// All entry ids currently in use, across experience, education and
    /// custom sections.
    pub fn entry_ids(&self) -> HashSet<String> {
        self.experience
            .iter()
            .map(|e| e.id.clone())
            .chain(self.education.iter().map(|e| e.id.clone()))
            .chain(self.custom_sections.iter().map(|s| s.id.clone()))
            .collect()
    }

    pub fn find_experience(&self, id: &str) -> Option<&Experience> {
        self.experience.iter().find(|e| e.id == id)
    }

    /// Gives a fresh id to every entry whose id is empty or already taken by
    /// an earlier entry. Returns how many ids were reassigned.
    pub fn repair_entry_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut repaired = 0;
        let ids = self
            .experience
            .iter_mut()
            .map(|e| &mut e.id)
            .chain(self.education.iter_mut().map(|e| &mut e.id))
            .chain(self.custom_sections.iter_mut().map(|s| &mut s.id));
        let mut needs_fresh = Vec::new();
        for id in ids {
            if id.is_empty() || !seen.insert(id.clone()) {
                needs_fresh.push(id);
            }
        }
        for id in needs_fresh {
            *id = fresh_entry_id(&seen);
            seen.insert(id.clone());
            repaired += 1;
        }
        repaired
    }
}

/// Generates an entry id that is not in `taken`.
pub fn fresh_entry_id(taken: &HashSet<String>) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
}
