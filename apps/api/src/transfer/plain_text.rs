//! Clipboard-style plain-text rendering of a draft.

use crate::models::resume::ResumeData;

pub fn render_plain_text(data: &ResumeData) -> String {
    let info = &data.personal_info;
    let mut text = String::new();

    text.push_str(&format!("{}\n", or_placeholder(&info.name, "Your Name")));
    text.push_str(&format!("{}\n\n", or_placeholder(&info.title, "Your Title")));
    for (label, value) in [
        ("Email", &info.email),
        ("Phone", &info.phone),
        ("Location", &info.location),
        ("LinkedIn", &info.linkedin),
        ("GitHub", &info.github),
    ] {
        if !value.is_empty() {
            text.push_str(&format!("{label}: {value}\n"));
        }
    }
    text.push('\n');

    if !data.summary.is_empty() {
        text.push_str(&format!("PROFESSIONAL SUMMARY\n{}\n\n", data.summary));
    }

    if !data.experience.is_empty() {
        text.push_str("EXPERIENCE\n");
        for exp in &data.experience {
            text.push_str(&format!("{} at {}\n", exp.role, exp.company));
            text.push_str(&format!("{} - {}\n", exp.start_date, exp.display_end()));
            if !exp.bullets.is_empty() {
                for bullet in &exp.bullets {
                    text.push_str(&format!("• {bullet}\n"));
                }
            } else if !exp.description.is_empty() {
                text.push_str(&format!("{}\n", exp.description));
            }
            text.push('\n');
        }
    }

    if !data.education.is_empty() {
        text.push_str("EDUCATION\n");
        for edu in &data.education {
            text.push_str(&format!("{}\n", edu.degree));
            text.push_str(&edu.institution);
            if !edu.year.is_empty() {
                text.push_str(&format!(", {}", edu.year));
            }
            text.push('\n');
            if let Some(gpa) = edu.gpa.as_deref().filter(|g| !g.is_empty()) {
                text.push_str(&format!("GPA: {gpa}\n"));
            }
            text.push('\n');
        }
    }

    if !data.skills.is_empty() {
        text.push_str(&format!("SKILLS\n{}\n\n", data.skills.join(", ")));
    }

    for section in data.custom_sections.iter().filter(|s| !s.items.is_empty()) {
        text.push_str(&format!("{}\n", section.title.to_uppercase()));
        for item in &section.items {
            text.push_str(&format!("• {item}\n"));
        }
        text.push('\n');
    }

    text
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}
