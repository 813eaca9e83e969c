use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::document::layout::Layout;

// ────────────────────────────────────────────────────────────────────────────
// Root document
// ────────────────────────────────────────────────────────────────────────────

/// The resume being edited. Serialized with camelCase keys so a stored
/// document keeps the shape the web client has always written, including
/// its short string ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawResumeDocument")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Skills,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub theme: Theme,
    pub layout: Layout,
}

/// Wire form of [`ResumeDocument`]. Record ids are repaired on the way in.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawResumeDocument {
    personal_info: PersonalInfo,
    summary: String,
    skills: Skills,
    experience: Vec<Experience>,
    education: Vec<Education>,
    projects: Vec<Project>,
    certifications: Vec<Certification>,
    languages: Vec<Language>,
    theme: Theme,
    layout: Layout,
}

impl From<RawResumeDocument> for ResumeDocument {
    fn from(raw: RawResumeDocument) -> Self {
        let mut doc = ResumeDocument {
            personal_info: raw.personal_info,
            summary: raw.summary,
            skills: raw.skills,
            experience: raw.experience,
            education: raw.education,
            projects: raw.projects,
            certifications: raw.certifications,
            languages: raw.languages,
            theme: raw.theme,
            layout: raw.layout,
        };
        repair_ids(&mut doc.experience);
        repair_ids(&mut doc.education);
        repair_ids(&mut doc.projects);
        repair_ids(&mut doc.certifications);
        repair_ids(&mut doc.languages);
        doc
    }
}

impl ResumeDocument {
    /// Full name, or an empty string when unset.
    pub fn full_name(&self) -> &str {
        self.personal_info.full_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    /// Image reference (data URI or URL) for templates that show a photo.
    pub profile_image: Option<String>,
}

impl PersonalInfo {
    /// Non-empty contact fields in display order.
    pub fn contacts(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.website,
            &self.linkedin,
            &self.github,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect()
    }

    /// Initials of the full name, e.g. "JD" for "John Doe".
    pub fn initials(&self) -> String {
        self.full_name
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// List-item records
// ────────────────────────────────────────────────────────────────────────────

/// Records that live in an ordered section list and carry a stable id.
///
/// A nil id means "not yet assigned"; the mutator replaces it on insertion.
pub trait Identified {
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
            fn set_id(&mut self, id: Uuid) {
                self.id = id;
            }
        })+
    };
}

identified!(Experience, Education, Project, Certification, Language);

/// A v4 id not yet used in `items`.
pub(crate) fn fresh_id<T: Identified>(items: &[T]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !items.iter().any(|existing| existing.id() == id) {
            return id;
        }
    }
}

/// Gives every nil or repeated id a fresh one. The first holder of an id
/// keeps it.
fn repair_ids<T: Identified>(items: &mut [T]) {
    let mut seen = HashSet::with_capacity(items.len());
    for i in 0..items.len() {
        let id = items[i].id();
        if id.is_nil() || !seen.insert(id) {
            let id = fresh_id(items);
            items[i].set_id(id);
            seen.insert(id);
        }
    }
}

/// Reads a record id. UUIDs pass through; any other string or number is
/// mapped to a name-based UUID, so the same stored id always reads back the
/// same. Null or blank means unassigned.
fn record_id<'de, D: Deserializer<'de>>(de: D) -> Result<Uuid, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredId {
        Text(String),
        Number(serde_json::Number),
    }

    let raw = match Option::<StoredId>::deserialize(de)? {
        None => return Ok(Uuid::nil()),
        Some(StoredId::Text(s)) => s,
        Some(StoredId::Number(n)) => n.to_string(),
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Uuid::nil());
    }
    Ok(Uuid::parse_str(raw)
        .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes())))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(deserialize_with = "record_id")]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, templates print "Present" instead of `end_date`.
    pub current: bool,
    pub achievements: Vec<String>,
}

impl Experience {
    pub fn date_range(&self) -> String {
        let end = if self.current {
            "Present"
        } else {
            self.end_date.as_str()
        };
        join_dates(&self.start_date, end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "record_id")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
}

impl Education {
    pub fn date_range(&self) -> String {
        join_dates(&self.start_date, &self.end_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "record_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "record_id")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(deserialize_with = "record_id")]
    pub id: Uuid,
    pub name: String,
    pub proficiency: String,
}

fn join_dates(start: &str, end: &str) -> String {
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    /// Corner radius in px for boxed elements.
    pub border_radius: u8,
    pub spacing: Spacing,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#f1f5f9".to_string(),
            accent_color: "#3b82f6".to_string(),
            text_color: "#1f2937".to_string(),
            background_color: "#ffffff".to_string(),
            font_family: FontFamily::Inter,
            font_size: FontSize::Medium,
            border_radius: 8,
            spacing: Spacing::Normal,
        }
    }
}

/// The font families offered by the design panel. Serialized as the CSS
/// font stack so stored documents stay readable by the web client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Inter, sans-serif")]
    Inter,
    #[serde(rename = "Roboto, sans-serif")]
    Roboto,
    #[serde(rename = "Open Sans, sans-serif")]
    OpenSans,
    #[serde(rename = "Lato, sans-serif")]
    Lato,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Inter,
        FontFamily::Roboto,
        FontFamily::OpenSans,
        FontFamily::Lato,
    ];

    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Inter => "Inter, sans-serif",
            FontFamily::Roboto => "Roboto, sans-serif",
            FontFamily::OpenSans => "Open Sans, sans-serif",
            FontFamily::Lato => "Lato, sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Base body size in px.
    pub fn px(&self) -> f32 {
        match self {
            FontSize::Small => 12.0,
            FontSize::Medium => 14.0,
            FontSize::Large => 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

impl Spacing {
    /// Vertical gap between sections in px.
    pub fn section_gap(&self) -> f32 {
        match self {
            Spacing::Compact => 12.0,
            Spacing::Normal => 20.0,
            Spacing::Relaxed => 28.0,
        }
    }
}

/// Parses `#rgb` or `#rrggbb` into its components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut parts = hex.chars().map(|c| {
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 16 + v
            });
            Some((parts.next()?, parts.next()?, parts.next()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}
