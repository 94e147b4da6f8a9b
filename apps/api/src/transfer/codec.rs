//! JSON transfer format for résumé drafts.
//!
//! Import comes in two strengths:
//! - [`ImportMode::Lenient`] only insists on a `personalInfo` member, as
//!   drafts have always been accepted. A field of the wrong type degrades to
//!   its empty value on its own. Array elements that are not objects are
//!   skipped with a warning.
//! - [`ImportMode::Strict`] checks every member and nested field for its
//!   basic JSON type and rejects the document with the full list of
//!   problems.
//!
//! Both modes leave every entry with a unique, non-empty id.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::lenient;
use crate::models::resume::ResumeData;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("file is not UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document has no personalInfo member")]
    MissingPersonalInfo,

    #[error("document does not match the resume shape: {}", .0.join("; "))]
    Shape(Vec<String>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Lenient,
    Strict,
}

impl std::str::FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ImportMode::Lenient),
            "strict" => Ok(ImportMode::Strict),
            other => Err(format!("unknown import mode '{other}'")),
        }
    }
}

/// Pretty-printed JSON for a draft.
pub fn export_as_json(data: &ResumeData) -> String {
    // Plain structs of strings, bools and vectors always serialize.
    serde_json::to_string_pretty(data).unwrap_or_default()
}

/// `<name>-resume.json`, or `resume-resume.json` for an unnamed draft.
pub fn export_filename(data: &ResumeData) -> String {
    let name = data.personal_info.name.trim();
    let stem: String = if name.is_empty() {
        "resume".to_string()
    } else {
        name.chars()
            .map(|c| if matches!(c, '/' | '\\' | '"' | ':') || c.is_control() { '_' } else { c })
            .collect()
    };
    format!("{stem}-resume.json")
}

/// Imports a draft leniently. Any failure is logged and yields `None`.
pub fn import_from_json(text: &str) -> Option<ResumeData> {
    match decode(text, ImportMode::Lenient) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("Rejected resume import: {e}");
            None
        }
    }
}

/// [`decode`] for raw file bytes, which must be UTF-8.
pub fn decode_bytes(bytes: &[u8], mode: ImportMode) -> Result<ResumeData, TransferError> {
    decode(std::str::from_utf8(bytes)?, mode)
}

pub fn decode(text: &str, mode: ImportMode) -> Result<ResumeData, TransferError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.get("personalInfo").is_some_and(is_truthy) {
        return Err(TransferError::MissingPersonalInfo);
    }

    match mode {
        ImportMode::Lenient => Ok(decode_lenient(&value)),
        ImportMode::Strict => decode_strict(value),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn decode_lenient(value: &Value) -> ResumeData {
    let mut data = ResumeData {
        personal_info: member(value, "personalInfo"),
        summary: scalar(value, "summary", lenient::string),
        experience: elements(value, "experience"),
        education: elements(value, "education"),
        skills: scalar(value, "skills", lenient::strings),
        custom_sections: elements(value, "customSections"),
        job_title: scalar(value, "jobTitle", lenient::optional_string),
    };

    let repaired = data.repair_entry_ids();
    if repaired > 0 {
        warn!("Assigned fresh ids to {repaired} imported entries");
    }
    data
}

fn member<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    match value.get(key) {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            warn!("Ignoring malformed '{key}' member: {e}");
            T::default()
        }),
    }
}

fn scalar<T: Default>(
    value: &Value,
    key: &str,
    read: fn(Value) -> Result<T, serde_json::Error>,
) -> T {
    value
        .get(key)
        .cloned()
        .map(read)
        .and_then(Result::ok)
        .unwrap_or_default()
}

fn elements<T: DeserializeOwned>(value: &Value, key: &str) -> Vec<T> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                serde_json::from_value(item.clone())
                    .map_err(|e| warn!("Skipping malformed {key}[{i}]: {e}"))
                    .ok()
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            warn!("Ignoring '{key}' member: expected an array");
            Vec::new()
        }
    }
}

fn decode_strict(value: Value) -> Result<ResumeData, TransferError> {
    let problems = shape_problems(&value);
    if !problems.is_empty() {
        return Err(TransferError::Shape(problems));
    }
    Ok(serde_json::from_value(value)?)
}

#[derive(Clone, Copy)]
enum Kind {
    String,
    Bool,
    Object,
    Array,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Bool => value.is_boolean(),
            Kind::Object => value.is_object(),
            Kind::Array => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Bool => "a boolean",
            Kind::Object => "an object",
            Kind::Array => "an array",
        }
    }
}

const PERSONAL_INFO_FIELDS: &[&str] =
    &["name", "title", "email", "phone", "location", "linkedin", "github"];

const EXPERIENCE_FIELDS: &[(&str, Kind)] = &[
    ("id", Kind::String),
    ("role", Kind::String),
    ("company", Kind::String),
    ("startDate", Kind::String),
    ("endDate", Kind::String),
    ("current", Kind::Bool),
    ("description", Kind::String),
    ("bullets", Kind::Array),
];

const EDUCATION_FIELDS: &[(&str, Kind)] = &[
    ("id", Kind::String),
    ("degree", Kind::String),
    ("institution", Kind::String),
    ("year", Kind::String),
];

const CUSTOM_SECTION_FIELDS: &[(&str, Kind)] = &[
    ("id", Kind::String),
    ("title", Kind::String),
    ("items", Kind::Array),
];

/// Every structural problem in `value`, as `path: expected ...` lines.
pub fn shape_problems(value: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(root) = value.as_object() else {
        problems.push("$: expected an object".to_string());
        return problems;
    };

    if let Some(info) =
        require(root, "$", "personalInfo", Kind::Object, &mut problems).and_then(Value::as_object)
    {
        for field in PERSONAL_INFO_FIELDS {
            require(info, "personalInfo", field, Kind::String, &mut problems);
        }
    }
    require(root, "$", "summary", Kind::String, &mut problems);
    optional(root, "$", "jobTitle", Kind::String, &mut problems);

    let mut ids = HashSet::new();
    check_entries(root, "experience", EXPERIENCE_FIELDS, &mut ids, &mut problems);
    check_entries(root, "education", EDUCATION_FIELDS, &mut ids, &mut problems);
    check_entries(root, "customSections", CUSTOM_SECTION_FIELDS, &mut ids, &mut problems);

    if let Some(education) = root.get("education").and_then(Value::as_array) {
        for (i, entry) in education.iter().enumerate() {
            if let Some(entry) = entry.as_object() {
                optional(entry, &format!("education[{i}]"), "gpa", Kind::String, &mut problems);
            }
        }
    }
    if let Some(skills) = require(root, "$", "skills", Kind::Array, &mut problems) {
        check_strings(skills, "skills", &mut problems);
    }

    problems
}

fn check_entries(
    root: &Map<String, Value>,
    key: &str,
    fields: &[(&str, Kind)],
    ids: &mut HashSet<String>,
    problems: &mut Vec<String>,
) {
    let Some(entries) = require(root, "$", key, Kind::Array, problems).and_then(Value::as_array)
    else {
        return;
    };

    for (i, entry) in entries.iter().enumerate() {
        let path = format!("{key}[{i}]");
        let Some(entry) = entry.as_object() else {
            problems.push(format!("{path}: expected an object"));
            continue;
        };
        for (field, kind) in fields {
            if let Some(v) = require(entry, &path, field, *kind, problems) {
                if matches!(kind, Kind::Array) {
                    check_strings(v, &format!("{path}.{field}"), problems);
                }
            }
        }
        match entry.get("id").and_then(Value::as_str) {
            Some("") => problems.push(format!("{path}.id: must not be empty")),
            Some(id) if !ids.insert(id.to_string()) => {
                problems.push(format!("{path}.id: duplicate id '{id}'"))
            }
            _ => {}
        }
    }
}

fn require<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
    kind: Kind,
    problems: &mut Vec<String>,
) -> Option<&'a Value> {
    match obj.get(key) {
        Some(v) if kind.matches(v) => Some(v),
        Some(_) => {
            problems.push(format!("{path}.{key}: expected {}", kind.name()));
            None
        }
        None => {
            problems.push(format!("{path}.{key}: missing"));
            None
        }
    }
}

fn optional(obj: &Map<String, Value>, path: &str, key: &str, kind: Kind, problems: &mut Vec<String>) {
    match obj.get(key) {
        None | Some(Value::Null) => {}
        Some(v) if kind.matches(v) => {}
        Some(_) => problems.push(format!("{path}.{key}: expected {}", kind.name())),
    }
}

fn check_strings(value: &Value, path: &str, problems: &mut Vec<String>) {
    if let Some(items) = value.as_array() {
        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                problems.push(format!("{path}[{i}]: expected a string"));
            }
        }
    }
}
