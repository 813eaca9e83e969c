//! Typed field edits.
//!
//! Every editable leaf of a [`ResumeDocument`](crate::document::ResumeDocument)
//! has one variant here, carrying its value with the right type. The dotted
//! path form used by form bindings (`experience.0.company`) is parsed into an
//! [`Edit`] once, at the boundary, by [`Edit::from_path`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::document::{FontFamily, FontSize, SectionKey, Spacing, TemplateId};
use crate::errors::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FullName,
    JobTitle,
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    Github,
    ProfileImage,
}

impl PersonalField {
    const ALL: [PersonalField; 9] = [
        PersonalField::FullName,
        PersonalField::JobTitle,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Website,
        PersonalField::Linkedin,
        PersonalField::Github,
        PersonalField::ProfileImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::JobTitle => "jobTitle",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Website => "website",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Github => "github",
            PersonalField::ProfileImage => "profileImage",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Technical,
    Soft,
}

impl SkillKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::Technical => "technical",
            SkillKind::Soft => "soft",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "technical" => Some(SkillKind::Technical),
            "soft" => Some(SkillKind::Soft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceEdit {
    Company(String),
    Position(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Achievements(Vec<String>),
    Achievement(usize, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationEdit {
    Institution(String),
    Degree(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Gpa(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEdit {
    Name(String),
    Description(String),
    Technologies(Vec<String>),
    Technology(usize, String),
    Link(Option<String>),
    Highlights(Vec<String>),
    Highlight(usize, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificationEdit {
    Name(String),
    Issuer(String),
    Date(String),
    CredentialId(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageEdit {
    Name(String),
    Proficiency(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEdit {
    PrimaryColor(String),
    SecondaryColor(String),
    AccentColor(String),
    TextColor(String),
    BackgroundColor(String),
    FontFamily(FontFamily),
    FontSize(FontSize),
    BorderRadius(u8),
    Spacing(Spacing),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEdit {
    Template(TemplateId),
    Columns(u8),
    SectionVisibility(SectionKey, bool),
}

/// A single leaf update on a resume document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Personal(PersonalField, Option<String>),
    Summary(String),
    Skills(SkillKind, Vec<String>),
    Skill(SkillKind, usize, String),
    Experience(usize, ExperienceEdit),
    Education(usize, EducationEdit),
    Project(usize, ProjectEdit),
    Certification(usize, CertificationEdit),
    Language(usize, LanguageEdit),
    Theme(ThemeEdit),
    Layout(LayoutEdit),
}

impl Edit {
    /// Parses a dotted field path and a JSON value into a typed edit.
    pub fn from_path(path: &str, value: Value) -> Result<Edit, EditError> {
        let segments: Vec<&str> = path.split('.').collect();
        let bad_path = || EditError::InvalidPath(path.to_string());
        let v = ValueReader { path, value: &value };

        let edit = match segments.as_slice() {
            ["personalInfo", field] => {
                let field = PersonalField::parse(field).ok_or_else(bad_path)?;
                Edit::Personal(field, v.opt_text()?)
            }
            ["summary"] => Edit::Summary(v.text()?),
            ["skills", kind] => {
                Edit::Skills(SkillKind::parse(kind).ok_or_else(bad_path)?, v.list()?)
            }
            ["skills", kind, idx] => Edit::Skill(
                SkillKind::parse(kind).ok_or_else(bad_path)?,
                index(path, idx)?,
                v.text()?,
            ),
            ["experience", idx, rest @ ..] => {
                let i = index(path, idx)?;
                let edit = match rest {
                    ["company"] => ExperienceEdit::Company(v.text()?),
                    ["position"] => ExperienceEdit::Position(v.text()?),
                    ["location"] => ExperienceEdit::Location(v.text()?),
                    ["startDate"] => ExperienceEdit::StartDate(v.text()?),
                    ["endDate"] => ExperienceEdit::EndDate(v.text()?),
                    ["current"] => ExperienceEdit::Current(v.flag()?),
                    ["achievements"] => ExperienceEdit::Achievements(v.list()?),
                    ["achievements", j] => ExperienceEdit::Achievement(index(path, j)?, v.text()?),
                    _ => return Err(bad_path()),
                };
                Edit::Experience(i, edit)
            }
            ["education", idx, field] => {
                let i = index(path, idx)?;
                let edit = match *field {
                    "institution" => EducationEdit::Institution(v.text()?),
                    "degree" => EducationEdit::Degree(v.text()?),
                    "location" => EducationEdit::Location(v.text()?),
                    "startDate" => EducationEdit::StartDate(v.text()?),
                    "endDate" => EducationEdit::EndDate(v.text()?),
                    "gpa" => EducationEdit::Gpa(v.opt_text()?),
                    _ => return Err(bad_path()),
                };
                Edit::Education(i, edit)
            }
            ["projects", idx, rest @ ..] => {
                let i = index(path, idx)?;
                let edit = match rest {
                    ["name"] => ProjectEdit::Name(v.text()?),
                    ["description"] => ProjectEdit::Description(v.text()?),
                    ["technologies"] => ProjectEdit::Technologies(v.list()?),
                    ["technologies", j] => ProjectEdit::Technology(index(path, j)?, v.text()?),
                    ["link"] => ProjectEdit::Link(v.opt_text()?),
                    ["highlights"] => ProjectEdit::Highlights(v.list()?),
                    ["highlights", j] => ProjectEdit::Highlight(index(path, j)?, v.text()?),
                    _ => return Err(bad_path()),
                };
                Edit::Project(i, edit)
            }
            ["certifications", idx, field] => {
                let i = index(path, idx)?;
                let edit = match *field {
                    "name" => CertificationEdit::Name(v.text()?),
                    "issuer" => CertificationEdit::Issuer(v.text()?),
                    "date" => CertificationEdit::Date(v.text()?),
                    "credentialId" => CertificationEdit::CredentialId(v.opt_text()?),
                    _ => return Err(bad_path()),
                };
                Edit::Certification(i, edit)
            }
            ["languages", idx, field] => {
                let i = index(path, idx)?;
                let edit = match *field {
                    "name" => LanguageEdit::Name(v.text()?),
                    "proficiency" => LanguageEdit::Proficiency(v.text()?),
                    _ => return Err(bad_path()),
                };
                Edit::Language(i, edit)
            }
            ["theme", field] => Edit::Theme(match *field {
                "primaryColor" => ThemeEdit::PrimaryColor(v.text()?),
                "secondaryColor" => ThemeEdit::SecondaryColor(v.text()?),
                "accentColor" => ThemeEdit::AccentColor(v.text()?),
                "textColor" => ThemeEdit::TextColor(v.text()?),
                "backgroundColor" => ThemeEdit::BackgroundColor(v.text()?),
                "fontFamily" => ThemeEdit::FontFamily(v.decode()?),
                "fontSize" => ThemeEdit::FontSize(v.decode()?),
                "borderRadius" => ThemeEdit::BorderRadius(v.small_number()?),
                "spacing" => ThemeEdit::Spacing(v.decode()?),
                _ => return Err(bad_path()),
            }),
            ["layout", "template"] => Edit::Layout(LayoutEdit::Template(v.decode()?)),
            ["layout", "columns"] => Edit::Layout(LayoutEdit::Columns(v.small_number()?)),
            ["layout", "sectionVisibility", key] => {
                let key = key.parse::<SectionKey>().map_err(|_| bad_path())?;
                Edit::Layout(LayoutEdit::SectionVisibility(key, v.flag()?))
            }
            _ => return Err(bad_path()),
        };

        Ok(edit)
    }

    /// The dotted path this edit addresses.
    pub fn path(&self) -> String {
        match self {
            Edit::Personal(field, _) => format!("personalInfo.{}", field.as_str()),
            Edit::Summary(_) => "summary".to_string(),
            Edit::Skills(kind, _) => format!("skills.{}", kind.as_str()),
            Edit::Skill(kind, i, _) => format!("skills.{}.{i}", kind.as_str()),
            Edit::Experience(i, e) => format!(
                "experience.{i}.{}",
                match e {
                    ExperienceEdit::Company(_) => "company".to_string(),
                    ExperienceEdit::Position(_) => "position".to_string(),
                    ExperienceEdit::Location(_) => "location".to_string(),
                    ExperienceEdit::StartDate(_) => "startDate".to_string(),
                    ExperienceEdit::EndDate(_) => "endDate".to_string(),
                    ExperienceEdit::Current(_) => "current".to_string(),
                    ExperienceEdit::Achievements(_) => "achievements".to_string(),
                    ExperienceEdit::Achievement(j, _) => format!("achievements.{j}"),
                }
            ),
            Edit::Education(i, e) => format!(
                "education.{i}.{}",
                match e {
                    EducationEdit::Institution(_) => "institution",
                    EducationEdit::Degree(_) => "degree",
                    EducationEdit::Location(_) => "location",
                    EducationEdit::StartDate(_) => "startDate",
                    EducationEdit::EndDate(_) => "endDate",
                    EducationEdit::Gpa(_) => "gpa",
                }
            ),
            Edit::Project(i, e) => format!(
                "projects.{i}.{}",
                match e {
                    ProjectEdit::Name(_) => "name".to_string(),
                    ProjectEdit::Description(_) => "description".to_string(),
                    ProjectEdit::Technologies(_) => "technologies".to_string(),
                    ProjectEdit::Technology(j, _) => format!("technologies.{j}"),
                    ProjectEdit::Link(_) => "link".to_string(),
                    ProjectEdit::Highlights(_) => "highlights".to_string(),
                    ProjectEdit::Highlight(j, _) => format!("highlights.{j}"),
                }
            ),
            Edit::Certification(i, e) => format!(
                "certifications.{i}.{}",
                match e {
                    CertificationEdit::Name(_) => "name",
                    CertificationEdit::Issuer(_) => "issuer",
                    CertificationEdit::Date(_) => "date",
                    CertificationEdit::CredentialId(_) => "credentialId",
                }
            ),
            Edit::Language(i, e) => format!(
                "languages.{i}.{}",
                match e {
                    LanguageEdit::Name(_) => "name",
                    LanguageEdit::Proficiency(_) => "proficiency",
                }
            ),
            Edit::Theme(e) => format!(
                "theme.{}",
                match e {
                    ThemeEdit::PrimaryColor(_) => "primaryColor",
                    ThemeEdit::SecondaryColor(_) => "secondaryColor",
                    ThemeEdit::AccentColor(_) => "accentColor",
                    ThemeEdit::TextColor(_) => "textColor",
                    ThemeEdit::BackgroundColor(_) => "backgroundColor",
                    ThemeEdit::FontFamily(_) => "fontFamily",
                    ThemeEdit::FontSize(_) => "fontSize",
                    ThemeEdit::BorderRadius(_) => "borderRadius",
                    ThemeEdit::Spacing(_) => "spacing",
                }
            ),
            Edit::Layout(LayoutEdit::Template(_)) => "layout.template".to_string(),
            Edit::Layout(LayoutEdit::Columns(_)) => "layout.columns".to_string(),
            Edit::Layout(LayoutEdit::SectionVisibility(key, _)) => {
                format!("layout.sectionVisibility.{key}")
            }
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn index(path: &str, segment: &str) -> Result<usize, EditError> {
    segment
        .parse::<usize>()
        .map_err(|_| EditError::InvalidPath(path.to_string()))
}

/// Typed accessors over the JSON value paired with a path.
struct ValueReader<'a> {
    path: &'a str,
    value: &'a Value,
}

impl ValueReader<'_> {
    fn invalid(&self, expected: &str) -> EditError {
        EditError::InvalidValue {
            path: self.path.to_string(),
            reason: format!("expected {expected}, got {}", self.value),
        }
    }

    fn text(&self) -> Result<String, EditError> {
        self.value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid("a string"))
    }

    fn opt_text(&self) -> Result<Option<String>, EditError> {
        match self.value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.invalid("a string or null")),
        }
    }

    fn flag(&self) -> Result<bool, EditError> {
        self.value.as_bool().ok_or_else(|| self.invalid("a boolean"))
    }

    fn list(&self) -> Result<Vec<String>, EditError> {
        self.value
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            })
            .ok_or_else(|| self.invalid("an array of strings"))
    }

    fn small_number(&self) -> Result<u8, EditError> {
        self.value
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| self.invalid("an integer 0-255"))
    }

    fn decode<T: DeserializeOwned>(&self) -> Result<T, EditError> {
        serde_json::from_value(self.value.clone()).map_err(|e| EditError::InvalidValue {
            path: self.path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_personal_field() {
        let edit = Edit::from_path("personalInfo.fullName", json!("Jane Smith")).unwrap();
        assert_eq!(
            edit,
            Edit::Personal(PersonalField::FullName, Some("Jane Smith".into()))
        );
    }

    #[test]
    fn test_parse_personal_field_null_clears() {
        let edit = Edit::from_path("personalInfo.profileImage", Value::Null).unwrap();
        assert_eq!(edit, Edit::Personal(PersonalField::ProfileImage, None));
    }

    #[test]
    fn test_parse_indexed_experience_field() {
        let edit = Edit::from_path("experience.0.company", json!("Acme")).unwrap();
        assert_eq!(
            edit,
            Edit::Experience(0, ExperienceEdit::Company("Acme".into()))
        );
    }

    #[test]
    fn test_parse_nested_achievement() {
        let edit = Edit::from_path("experience.2.achievements.1", json!("Shipped v2")).unwrap();
        assert_eq!(
            edit,
            Edit::Experience(2, ExperienceEdit::Achievement(1, "Shipped v2".into()))
        );
    }

    #[test]
    fn test_parse_current_flag() {
        let edit = Edit::from_path("experience.0.current", json!(false)).unwrap();
        assert_eq!(edit, Edit::Experience(0, ExperienceEdit::Current(false)));
    }

    #[test]
    fn test_parse_theme_enum_values() {
        assert_eq!(
            Edit::from_path("theme.fontSize", json!("large")).unwrap(),
            Edit::Theme(ThemeEdit::FontSize(FontSize::Large))
        );
        assert_eq!(
            Edit::from_path("theme.fontFamily", json!("Lato, sans-serif")).unwrap(),
            Edit::Theme(ThemeEdit::FontFamily(FontFamily::Lato))
        );
    }

    #[test]
    fn test_parse_theme_enum_rejects_unknown_member() {
        let err = Edit::from_path("theme.fontSize", json!("huge")).unwrap_err();
        assert!(matches!(err, EditError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_section_visibility() {
        let edit = Edit::from_path("layout.sectionVisibility.languages", json!(true)).unwrap();
        assert_eq!(
            edit,
            Edit::Layout(LayoutEdit::SectionVisibility(SectionKey::Languages, true))
        );
    }

    #[test]
    fn test_parse_template() {
        let edit = Edit::from_path("layout.template", json!("classic")).unwrap();
        assert_eq!(edit, Edit::Layout(LayoutEdit::Template(TemplateId::Classic)));
    }

    #[test]
    fn test_unknown_path_rejected() {
        assert_eq!(
            Edit::from_path("personalInfo.shoeSize", json!("42")),
            Err(EditError::InvalidPath("personalInfo.shoeSize".into()))
        );
        assert!(Edit::from_path("experience.x.company", json!("A")).is_err());
        assert!(Edit::from_path("layout.sectionOrder", json!([])).is_err());
    }

    #[test]
    fn test_wrong_value_type_rejected() {
        let err = Edit::from_path("summary", json!(42)).unwrap_err();
        assert!(matches!(err, EditError::InvalidValue { .. }));
    }

    #[test]
    fn test_path_round_trips() {
        for (path, value) in [
            ("personalInfo.fullName", json!("A")),
            ("summary", json!("B")),
            ("skills.soft", json!(["x"])),
            ("skills.technical.0", json!("Rust")),
            ("experience.1.achievements.0", json!("C")),
            ("education.0.gpa", json!("4.0")),
            ("projects.0.highlights.3", json!("D")),
            ("certifications.0.credentialId", json!("E")),
            ("languages.1.proficiency", json!("F")),
            ("theme.spacing", json!("compact")),
            ("layout.columns", json!(2)),
            ("layout.sectionVisibility.skills", json!(false)),
        ] {
            let edit = Edit::from_path(path, value).unwrap();
            assert_eq!(edit.path(), path);
        }
    }
}
