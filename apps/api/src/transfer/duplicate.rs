use crate::models::resume::{fresh_entry_id, ResumeData};

/// Deep copy of `data` where every experience, education and custom section
/// entry gets a new id. New ids collide neither with the source ids nor with
/// each other; everything else, order included, is preserved.
pub fn duplicate(data: &ResumeData) -> ResumeData {
    let mut taken = data.entry_ids();
    let mut copy = data.clone();
    let ids = copy
        .experience
        .iter_mut()
        .map(|e| &mut e.id)
        .chain(copy.education.iter_mut().map(|e| &mut e.id))
        .chain(copy.custom_sections.iter_mut().map(|s| &mut s.id));
    for id in ids {
        *id = fresh_entry_id(&taken);
        taken.insert(id.clone());
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CustomSection, Education, Experience};

    fn sample() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_info.name = "Ada".into();
        data.skills = vec!["Rust".into()];
        data.experience = vec![
            Experience {
                role: "Dev".into(),
                bullets: vec!["Shipped".into()],
                ..Experience::new("1".into())
            },
            Experience::new("2".into()),
        ];
        data.education = vec![Education::new("3".into())];
        data.custom_sections = vec![CustomSection {
            title: "Awards".into(),
            items: vec!["Gold".into()],
            ..CustomSection::new("4".into())
        }];
        data
    }

    #[test]
    fn test_duplicate_assigns_fresh_ids() {
        let source = sample();
        let copy = duplicate(&source);

        let source_ids = source.entry_ids();
        let copy_ids = copy.entry_ids();
        assert_eq!(copy_ids.len(), 4);
        assert!(copy_ids.is_disjoint(&source_ids));
    }

    #[test]
    fn test_duplicate_preserves_everything_else() {
        let source = sample();
        let mut copy = duplicate(&source);
        assert_eq!(copy.experience[0].role, "Dev");
        assert_eq!(copy.experience[0].bullets, vec!["Shipped"]);

        for (c, s) in copy.experience.iter_mut().zip(&source.experience) {
            c.id = s.id.clone();
        }
        for (c, s) in copy.education.iter_mut().zip(&source.education) {
            c.id = s.id.clone();
        }
        for (c, s) in copy.custom_sections.iter_mut().zip(&source.custom_sections) {
            c.id = s.id.clone();
        }
        assert_eq!(copy, source);
    }

    #[test]
    fn test_duplicate_of_empty_resume() {
        assert_eq!(duplicate(&ResumeData::default()), ResumeData::default());
    }
}
