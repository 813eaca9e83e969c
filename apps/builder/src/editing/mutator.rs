//! Field mutator: applies typed edits and list insert/remove to a document.
//!
//! Every function clones the input, applies the change to the clone, and
//! returns it. On error the clone is dropped, so the caller's document is
//! never partially modified and earlier history snapshots never alias the
//! result.

use crate::document::model::fresh_id;
use crate::document::{parse_hex_color, Identified, ResumeDocument};
use crate::editing::edit::{
    CertificationEdit, Edit, EducationEdit, ExperienceEdit, LanguageEdit, LayoutEdit,
    ProjectEdit, SkillKind, ThemeEdit,
};
use crate::editing::list::{item_mut, with_list, ListItem, ListPath, OrderedList};
use crate::errors::EditError;

/// Returns a copy of `doc` with the leaf addressed by `edit` replaced.
pub fn set(doc: &ResumeDocument, edit: &Edit) -> Result<ResumeDocument, EditError> {
    let mut next = doc.clone();
    apply(&mut next, edit)?;
    Ok(next)
}

/// Appends `item` to the list at `path`, assigning a fresh id to records
/// whose id is nil.
pub fn add_list_item(
    doc: &ResumeDocument,
    path: ListPath,
    item: ListItem,
) -> Result<ResumeDocument, EditError> {
    let mut next = doc.clone();
    let list = path.to_string();

    match (path, item) {
        (ListPath::Experience, ListItem::Experience(item)) => {
            push_record(&mut next.experience, &list, item)?
        }
        (ListPath::Education, ListItem::Education(item)) => {
            push_record(&mut next.education, &list, item)?
        }
        (ListPath::Projects, ListItem::Project(item)) => {
            push_record(&mut next.projects, &list, item)?
        }
        (ListPath::Certifications, ListItem::Certification(item)) => {
            push_record(&mut next.certifications, &list, item)?
        }
        (ListPath::Languages, ListItem::Language(item)) => {
            push_record(&mut next.languages, &list, item)?
        }
        (ListPath::Skills(kind), ListItem::Text(text)) => skills_mut(&mut next, kind).push(text),
        (ListPath::Achievements(i), ListItem::Text(text)) => {
            item_mut(&mut next.experience, "experience", i)?
                .achievements
                .push(text)
        }
        (ListPath::Technologies(i), ListItem::Text(text)) => {
            item_mut(&mut next.projects, "projects", i)?
                .technologies
                .push(text)
        }
        (ListPath::Highlights(i), ListItem::Text(text)) => {
            item_mut(&mut next.projects, "projects", i)?
                .highlights
                .push(text)
        }
        _ => return Err(EditError::ItemKindMismatch(list)),
    }

    Ok(next)
}

/// Removes the element at `index` from the list at `path`.
///
/// A protected list holding a single element is left untouched and
/// [`EditError::LastItem`] is returned.
pub fn remove_list_item(
    doc: &ResumeDocument,
    path: ListPath,
    index: usize,
) -> Result<ResumeDocument, EditError> {
    let mut next = doc.clone();

    with_list(&mut next, path, |items| {
        let len = items.len();
        if index >= len {
            return Err(EditError::IndexOutOfRange {
                list: path.to_string(),
                index,
                len,
            });
        }
        if len == 1 && path.is_protected() {
            return Err(EditError::LastItem(path.to_string()));
        }
        items.remove_at(index);
        Ok(())
    })??;

    Ok(next)
}

fn push_record<T: Identified>(items: &mut Vec<T>, list: &str, mut item: T) -> Result<(), EditError> {
    let id = item.id();
    if id.is_nil() {
        item.set_id(fresh_id(items));
    } else if items.iter().any(|existing| existing.id() == id) {
        return Err(EditError::DuplicateId {
            list: list.to_string(),
            id,
        });
    }
    items.push(item);
    Ok(())
}

fn skills_mut(doc: &mut ResumeDocument, kind: SkillKind) -> &mut Vec<String> {
    match kind {
        SkillKind::Technical => &mut doc.skills.technical,
        SkillKind::Soft => &mut doc.skills.soft,
    }
}

fn string_mut<'a>(items: &'a mut [String], list: &str, index: usize) -> Result<&'a mut String, EditError> {
    item_mut(items, list, index)
}

fn color(path: &str, value: &str) -> Result<String, EditError> {
    match parse_hex_color(value) {
        Some(_) => Ok(value.trim().to_string()),
        None => Err(EditError::InvalidValue {
            path: path.to_string(),
            reason: format!("'{value}' is not a hex colour"),
        }),
    }
}

fn apply(doc: &mut ResumeDocument, edit: &Edit) -> Result<(), EditError> {
    match edit {
        Edit::Personal(field, value) => {
            use crate::editing::edit::PersonalField::*;
            let info = &mut doc.personal_info;
            let slot = match field {
                FullName => &mut info.full_name,
                JobTitle => &mut info.job_title,
                Email => &mut info.email,
                Phone => &mut info.phone,
                Location => &mut info.location,
                Website => &mut info.website,
                Linkedin => &mut info.linkedin,
                Github => &mut info.github,
                ProfileImage => &mut info.profile_image,
            };
            *slot = value.clone();
        }
        Edit::Summary(text) => doc.summary = text.clone(),
        Edit::Skills(kind, items) => *skills_mut(doc, *kind) = items.clone(),
        Edit::Skill(kind, i, text) => {
            let list = format!("skills.{}", kind.as_str());
            *string_mut(skills_mut(doc, *kind), &list, *i)? = text.clone();
        }
        Edit::Experience(i, e) => {
            let exp = item_mut(&mut doc.experience, "experience", *i)?;
            match e {
                ExperienceEdit::Company(v) => exp.company = v.clone(),
                ExperienceEdit::Position(v) => exp.position = v.clone(),
                ExperienceEdit::Location(v) => exp.location = v.clone(),
                ExperienceEdit::StartDate(v) => exp.start_date = v.clone(),
                ExperienceEdit::EndDate(v) => exp.end_date = v.clone(),
                ExperienceEdit::Current(v) => exp.current = *v,
                ExperienceEdit::Achievements(v) => exp.achievements = v.clone(),
                ExperienceEdit::Achievement(j, v) => {
                    let list = format!("experience.{i}.achievements");
                    *string_mut(&mut exp.achievements, &list, *j)? = v.clone();
                }
            }
        }
        Edit::Education(i, e) => {
            let edu = item_mut(&mut doc.education, "education", *i)?;
            match e {
                EducationEdit::Institution(v) => edu.institution = v.clone(),
                EducationEdit::Degree(v) => edu.degree = v.clone(),
                EducationEdit::Location(v) => edu.location = v.clone(),
                EducationEdit::StartDate(v) => edu.start_date = v.clone(),
                EducationEdit::EndDate(v) => edu.end_date = v.clone(),
                EducationEdit::Gpa(v) => edu.gpa = v.clone(),
            }
        }
        Edit::Project(i, e) => {
            let project = item_mut(&mut doc.projects, "projects", *i)?;
            match e {
                ProjectEdit::Name(v) => project.name = v.clone(),
                ProjectEdit::Description(v) => project.description = v.clone(),
                ProjectEdit::Technologies(v) => project.technologies = v.clone(),
                ProjectEdit::Technology(j, v) => {
                    let list = format!("projects.{i}.technologies");
                    *string_mut(&mut project.technologies, &list, *j)? = v.clone();
                }
                ProjectEdit::Link(v) => project.link = v.clone(),
                ProjectEdit::Highlights(v) => project.highlights = v.clone(),
                ProjectEdit::Highlight(j, v) => {
                    let list = format!("projects.{i}.highlights");
                    *string_mut(&mut project.highlights, &list, *j)? = v.clone();
                }
            }
        }
        Edit::Certification(i, e) => {
            let cert = item_mut(&mut doc.certifications, "certifications", *i)?;
            match e {
                CertificationEdit::Name(v) => cert.name = v.clone(),
                CertificationEdit::Issuer(v) => cert.issuer = v.clone(),
                CertificationEdit::Date(v) => cert.date = v.clone(),
                CertificationEdit::CredentialId(v) => cert.credential_id = v.clone(),
            }
        }
        Edit::Language(i, e) => {
            let lang = item_mut(&mut doc.languages, "languages", *i)?;
            match e {
                LanguageEdit::Name(v) => lang.name = v.clone(),
                LanguageEdit::Proficiency(v) => lang.proficiency = v.clone(),
            }
        }
        Edit::Theme(e) => {
            let path = edit.path();
            let theme = &mut doc.theme;
            match e {
                ThemeEdit::PrimaryColor(v) => theme.primary_color = color(&path, v)?,
                ThemeEdit::SecondaryColor(v) => theme.secondary_color = color(&path, v)?,
                ThemeEdit::AccentColor(v) => theme.accent_color = color(&path, v)?,
                ThemeEdit::TextColor(v) => theme.text_color = color(&path, v)?,
                ThemeEdit::BackgroundColor(v) => theme.background_color = color(&path, v)?,
                ThemeEdit::FontFamily(v) => theme.font_family = *v,
                ThemeEdit::FontSize(v) => theme.font_size = *v,
                ThemeEdit::BorderRadius(v) => theme.border_radius = *v,
                ThemeEdit::Spacing(v) => theme.spacing = *v,
            }
        }
        Edit::Layout(e) => match e {
            LayoutEdit::Template(v) => doc.layout.template = *v,
            LayoutEdit::Columns(v) => {
                if !(1..=2).contains(v) {
                    return Err(EditError::InvalidValue {
                        path: edit.path(),
                        reason: format!("columns must be 1 or 2, got {v}"),
                    });
                }
                doc.layout.columns = *v;
            }
            LayoutEdit::SectionVisibility(key, visible) => {
                doc.layout.set_visibility(*key, *visible)
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{seed_document, Experience, FontSize, SectionKey};
    use crate::editing::edit::PersonalField;
    use serde_json::json;

    #[test]
    fn test_set_changes_only_the_addressed_leaf() {
        let doc = seed_document();
        let next = set(&doc, &Edit::Experience(0, ExperienceEdit::Company("Acme".into()))).unwrap();

        assert_eq!(next.experience[0].company, "Acme");
        let mut expected = doc.clone();
        expected.experience[0].company = "Acme".into();
        assert_eq!(next, expected);
        assert_eq!(doc.experience[0].company, "Tech Corp");
    }

    #[test]
    fn test_set_from_dotted_path() {
        let doc = seed_document();
        let edit = Edit::from_path("personalInfo.fullName", json!("Jane Smith")).unwrap();
        let next = set(&doc, &edit).unwrap();
        assert_eq!(next.full_name(), "Jane Smith");
        assert_eq!(next.personal_info.email, doc.personal_info.email);
    }

    #[test]
    fn test_set_out_of_range_index_leaves_input() {
        let doc = seed_document();
        let err = set(&doc, &Edit::Education(3, EducationEdit::Degree("PhD".into()))).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                list: "education".into(),
                index: 3,
                len: 1
            }
        );
        assert_eq!(doc, seed_document());
    }

    #[test]
    fn test_set_nested_achievement() {
        let doc = seed_document();
        let next = set(
            &doc,
            &Edit::Experience(0, ExperienceEdit::Achievement(1, "Cut p99 by half".into())),
        )
        .unwrap();
        assert_eq!(next.experience[0].achievements[1], "Cut p99 by half");
        assert_eq!(next.experience[0].achievements.len(), 3);
    }

    #[test]
    fn test_set_rejects_invalid_colour() {
        let doc = seed_document();
        let err = set(&doc, &Edit::Theme(ThemeEdit::PrimaryColor("blue".into()))).unwrap_err();
        assert!(matches!(err, EditError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_theme_enum_and_visibility() {
        let doc = seed_document();
        let next = set(&doc, &Edit::Theme(ThemeEdit::FontSize(FontSize::Large))).unwrap();
        assert_eq!(next.theme.font_size, FontSize::Large);

        let next = set(
            &next,
            &Edit::Layout(LayoutEdit::SectionVisibility(SectionKey::Skills, false)),
        )
        .unwrap();
        assert!(!next.layout.is_visible(SectionKey::Skills));
        assert!(next.layout.is_permutation());
    }

    #[test]
    fn test_set_clears_optional_field() {
        let doc = seed_document();
        let next = set(&doc, &Edit::Personal(PersonalField::Website, None)).unwrap();
        assert_eq!(next.personal_info.website, None);
    }

    #[test]
    fn test_set_columns_out_of_range() {
        let doc = seed_document();
        assert!(set(&doc, &Edit::Layout(LayoutEdit::Columns(3))).is_err());
    }

    #[test]
    fn test_add_assigns_fresh_unique_id() {
        let doc = seed_document();
        let item = Experience {
            company: "Acme".into(),
            ..Default::default()
        };
        let next = add_list_item(&doc, ListPath::Experience, ListItem::Experience(item)).unwrap();

        assert_eq!(next.experience.len(), 2);
        let added = &next.experience[1];
        assert_eq!(added.company, "Acme");
        assert!(!added.id.is_nil());
        assert_ne!(added.id, next.experience[0].id);
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let doc = seed_document();
        let item = Experience {
            id: doc.experience[0].id,
            ..Default::default()
        };
        let err = add_list_item(&doc, ListPath::Experience, ListItem::Experience(item)).unwrap_err();
        assert!(matches!(err, EditError::DuplicateId { .. }));
    }

    #[test]
    fn test_add_rejects_kind_mismatch() {
        let doc = seed_document();
        let err = add_list_item(&doc, ListPath::Education, ListItem::Text("x".into())).unwrap_err();
        assert_eq!(err, EditError::ItemKindMismatch("education".into()));
    }

    #[test]
    fn test_add_text_to_nested_list() {
        let doc = seed_document();
        let next = add_list_item(
            &doc,
            ListPath::Achievements(0),
            ListItem::Text("Launched mobile app".into()),
        )
        .unwrap();
        assert_eq!(next.experience[0].achievements.len(), 4);
        assert_eq!(
            next.experience[0].achievements.last().map(String::as_str),
            Some("Launched mobile app")
        );
    }

    #[test]
    fn test_remove_last_protected_item_is_rejected() {
        let doc = seed_document();
        let err = remove_list_item(&doc, ListPath::Experience, 0).unwrap_err();
        assert_eq!(err, EditError::LastItem("experience".into()));
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn test_remove_reindexes() {
        let doc = seed_document();
        let next = remove_list_item(&doc, ListPath::Languages, 0).unwrap();
        assert_eq!(next.languages.len(), 1);
        assert_eq!(next.languages[0].name, "Spanish");
    }

    #[test]
    fn test_remove_unprotected_list_can_empty() {
        let mut doc = seed_document();
        doc.skills.soft = vec!["Leadership".into()];
        let next = remove_list_item(&doc, ListPath::Skills(SkillKind::Soft), 0).unwrap();
        assert!(next.skills.soft.is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let doc = seed_document();
        let err = remove_list_item(&doc, ListPath::Highlights(0), 9).unwrap_err();
        assert!(matches!(err, EditError::IndexOutOfRange { index: 9, .. }));
    }
}
