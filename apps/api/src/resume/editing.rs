//! Whole-value edits. Each operation leaves its input untouched and returns
//! the complete replacement draft.

use crate::models::resume::{
    fresh_entry_id, CustomSection, Education, Experience, PersonalInfo, ResumeData,
};

pub fn update_personal_info(
    data: &ResumeData,
    update: impl FnOnce(&mut PersonalInfo),
) -> ResumeData {
    let mut next = data.clone();
    update(&mut next.personal_info);
    next
}

/// Appends a blank experience entry and returns the new draft with its id.
pub fn with_new_experience(data: &ResumeData) -> (ResumeData, String) {
    let id = fresh_entry_id(&data.entry_ids());
    let mut next = data.clone();
    next.experience.push(Experience::new(id.clone()));
    (next, id)
}

/// Applies `update` to the experience with `id`. The entry keeps its id even
/// if the closure overwrites it. `None` when no such entry exists.
pub fn update_experience(
    data: &ResumeData,
    id: &str,
    update: impl FnOnce(&mut Experience),
) -> Option<ResumeData> {
    let mut next = data.clone();
    let entry = next.experience.iter_mut().find(|e| e.id == id)?;
    update(entry);
    entry.id = id.to_string();
    Some(next)
}

pub fn remove_experience(data: &ResumeData, id: &str) -> ResumeData {
    let mut next = data.clone();
    next.experience.retain(|e| e.id != id);
    next
}

pub fn with_new_education(data: &ResumeData) -> (ResumeData, String) {
    let id = fresh_entry_id(&data.entry_ids());
    let mut next = data.clone();
    next.education.push(Education::new(id.clone()));
    (next, id)
}

pub fn update_education(
    data: &ResumeData,
    id: &str,
    update: impl FnOnce(&mut Education),
) -> Option<ResumeData> {
    let mut next = data.clone();
    let entry = next.education.iter_mut().find(|e| e.id == id)?;
    update(entry);
    entry.id = id.to_string();
    Some(next)
}

pub fn remove_education(data: &ResumeData, id: &str) -> ResumeData {
    let mut next = data.clone();
    next.education.retain(|e| e.id != id);
    next
}

pub fn with_new_custom_section(data: &ResumeData) -> (ResumeData, String) {
    let id = fresh_entry_id(&data.entry_ids());
    let mut next = data.clone();
    next.custom_sections.push(CustomSection::new(id.clone()));
    (next, id)
}

pub fn update_custom_section(
    data: &ResumeData,
    id: &str,
    update: impl FnOnce(&mut CustomSection),
) -> Option<ResumeData> {
    let mut next = data.clone();
    let section = next.custom_sections.iter_mut().find(|s| s.id == id)?;
    update(section);
    section.id = id.to_string();
    Some(next)
}

pub fn remove_custom_section(data: &ResumeData, id: &str) -> ResumeData {
    let mut next = data.clone();
    next.custom_sections.retain(|s| s.id != id);
    next
}

/// Appends an empty item to a custom section.
pub fn add_custom_item(data: &ResumeData, section_id: &str) -> Option<ResumeData> {
    update_custom_section(data, section_id, |s| s.items.push(String::new()))
}

pub fn update_custom_item(
    data: &ResumeData,
    section_id: &str,
    index: usize,
    value: &str,
) -> Option<ResumeData> {
    let mut next = data.clone();
    let section = next.custom_sections.iter_mut().find(|s| s.id == section_id)?;
    *section.items.get_mut(index)? = value.to_string();
    Some(next)
}

pub fn remove_custom_item(data: &ResumeData, section_id: &str, index: usize) -> Option<ResumeData> {
    let mut next = data.clone();
    let section = next.custom_sections.iter_mut().find(|s| s.id == section_id)?;
    if index >= section.items.len() {
        return None;
    }
    section.items.remove(index);
    Some(next)
}

/// Adds one skill. Blank input and exact duplicates are ignored (`None`).
pub fn add_skill(data: &ResumeData, skill: &str) -> Option<ResumeData> {
    let trimmed = skill.trim();
    if trimmed.is_empty() || data.skills.iter().any(|s| s == trimmed) {
        return None;
    }
    let mut next = data.clone();
    next.skills.push(trimmed.to_string());
    Some(next)
}

/// Adds every comma- or newline-separated skill in `text` that is not
/// already present, in input order. `None` when nothing new was found.
pub fn add_skills(data: &ResumeData, text: &str) -> Option<ResumeData> {
    let mut next = data.clone();
    for skill in text.split([',', '\n']).map(str::trim) {
        if !skill.is_empty() && !next.skills.iter().any(|s| s == skill) {
            next.skills.push(skill.to_string());
        }
    }
    (next.skills.len() > data.skills.len()).then_some(next)
}

pub fn remove_skill(data: &ResumeData, skill: &str) -> ResumeData {
    let mut next = data.clone();
    next.skills.retain(|s| s != skill);
    next
}

pub fn clear_skills(data: &ResumeData) -> ResumeData {
    ResumeData {
        skills: Vec::new(),
        ..data.clone()
    }
}
