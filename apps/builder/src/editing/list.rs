use std::fmt;

use crate::document::{
    Certification, Education, Experience, Language, Project, ResumeDocument,
};
use crate::editing::edit::SkillKind;
use crate::errors::EditError;

/// An ordered list inside the document that items can be added to, removed
/// from, or moved within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPath {
    Experience,
    Education,
    Projects,
    Certifications,
    Languages,
    Skills(SkillKind),
    /// `experience.N.achievements`
    Achievements(usize),
    /// `projects.N.technologies`
    Technologies(usize),
    /// `projects.N.highlights`
    Highlights(usize),
}

impl ListPath {
    /// Section lists must keep at least one entry; hiding a section goes
    /// through `layout.sectionVisibility` instead.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            ListPath::Experience
                | ListPath::Education
                | ListPath::Projects
                | ListPath::Certifications
                | ListPath::Languages
        )
    }

    pub fn parse(path: &str) -> Result<ListPath, EditError> {
        let bad_path = || EditError::InvalidPath(path.to_string());
        let segments: Vec<&str> = path.split('.').collect();
        let index = |s: &str| s.parse::<usize>().map_err(|_| bad_path());

        Ok(match segments.as_slice() {
            ["experience"] => ListPath::Experience,
            ["education"] => ListPath::Education,
            ["projects"] => ListPath::Projects,
            ["certifications"] => ListPath::Certifications,
            ["languages"] => ListPath::Languages,
            ["skills", kind] => ListPath::Skills(SkillKind::parse(kind).ok_or_else(bad_path)?),
            ["experience", i, "achievements"] => ListPath::Achievements(index(*i)?),
            ["projects", i, "technologies"] => ListPath::Technologies(index(*i)?),
            ["projects", i, "highlights"] => ListPath::Highlights(index(*i)?),
            _ => return Err(bad_path()),
        })
    }
}

impl fmt::Display for ListPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListPath::Experience => f.write_str("experience"),
            ListPath::Education => f.write_str("education"),
            ListPath::Projects => f.write_str("projects"),
            ListPath::Certifications => f.write_str("certifications"),
            ListPath::Languages => f.write_str("languages"),
            ListPath::Skills(kind) => write!(f, "skills.{}", kind.as_str()),
            ListPath::Achievements(i) => write!(f, "experience.{i}.achievements"),
            ListPath::Technologies(i) => write!(f, "projects.{i}.technologies"),
            ListPath::Highlights(i) => write!(f, "projects.{i}.highlights"),
        }
    }
}

/// A new entry for a [`ListPath`]. Record ids left nil are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Experience(Experience),
    Education(Education),
    Project(Project),
    Certification(Certification),
    Language(Language),
    Text(String),
}

/// Length, removal and moves over any `Vec<T>`, so list operations can be
/// written once regardless of the element type.
pub(crate) trait OrderedList {
    fn len(&self) -> usize;
    fn remove_at(&mut self, index: usize);
    fn move_item(&mut self, from: usize, to: usize);
}

impl<T> OrderedList for Vec<T> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn remove_at(&mut self, index: usize) {
        self.remove(index);
    }

    fn move_item(&mut self, from: usize, to: usize) {
        let item = self.remove(from);
        self.insert(to, item);
    }
}

/// Resolves `index` in a record list, reporting the list name on failure.
pub(crate) fn item_mut<'a, T>(
    items: &'a mut [T],
    list: &str,
    index: usize,
) -> Result<&'a mut T, EditError> {
    let len = items.len();
    items.get_mut(index).ok_or(EditError::IndexOutOfRange {
        list: list.to_string(),
        index,
        len,
    })
}

/// Runs `f` against the list at `path` inside `doc`.
pub(crate) fn with_list<R>(
    doc: &mut ResumeDocument,
    path: ListPath,
    f: impl FnOnce(&mut dyn OrderedList) -> R,
) -> Result<R, EditError> {
    let list: &mut dyn OrderedList = match path {
        ListPath::Experience => &mut doc.experience,
        ListPath::Education => &mut doc.education,
        ListPath::Projects => &mut doc.projects,
        ListPath::Certifications => &mut doc.certifications,
        ListPath::Languages => &mut doc.languages,
        ListPath::Skills(SkillKind::Technical) => &mut doc.skills.technical,
        ListPath::Skills(SkillKind::Soft) => &mut doc.skills.soft,
        ListPath::Achievements(i) => &mut item_mut(&mut doc.experience, "experience", i)?.achievements,
        ListPath::Technologies(i) => &mut item_mut(&mut doc.projects, "projects", i)?.technologies,
        ListPath::Highlights(i) => &mut item_mut(&mut doc.projects, "projects", i)?.highlights,
    };
    Ok(f(list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_paths() {
        assert_eq!(ListPath::parse("experience"), Ok(ListPath::Experience));
        assert_eq!(
            ListPath::parse("skills.soft"),
            Ok(ListPath::Skills(SkillKind::Soft))
        );
        assert_eq!(
            ListPath::parse("experience.3.achievements"),
            Ok(ListPath::Achievements(3))
        );
        assert!(ListPath::parse("theme").is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for path in [
            ListPath::Languages,
            ListPath::Skills(SkillKind::Technical),
            ListPath::Highlights(2),
            ListPath::Technologies(0),
        ] {
            assert_eq!(ListPath::parse(&path.to_string()), Ok(path));
        }
    }

    #[test]
    fn test_only_section_lists_are_protected() {
        assert!(ListPath::Experience.is_protected());
        assert!(ListPath::Certifications.is_protected());
        assert!(!ListPath::Skills(SkillKind::Soft).is_protected());
        assert!(!ListPath::Achievements(0).is_protected());
    }

    #[test]
    fn test_move_item_on_vec() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        items.move_item(0, 2);
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
        items.move_item(3, 0);
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }
}
