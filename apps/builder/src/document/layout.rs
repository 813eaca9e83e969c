use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section keys
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of resume sections a template knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl SectionKey {
    /// Canonical order, used for the seed layout and to append missing keys.
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Certifications,
        SectionKey::Languages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Certifications => "certifications",
            SectionKey::Languages => "languages",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Summary => "Summary",
            SectionKey::Experience => "Experience",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Projects => "Projects",
            SectionKey::Certifications => "Certifications",
            SectionKey::Languages => "Languages",
        }
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template ids
// ────────────────────────────────────────────────────────────────────────────

/// The visual layouts a document can be rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Creative,
        TemplateId::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
        }
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown template '{s}'"))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Section ordering and visibility.
///
/// `section_order` is always a permutation of [`SectionKey::ALL`] and
/// `section_visibility` always has an entry per key. Both are private so the
/// only ways to change them are the visibility setter and permutation moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLayout")]
pub struct Layout {
    pub template: TemplateId,
    pub columns: u8,
    section_order: Vec<SectionKey>,
    section_visibility: BTreeMap<SectionKey, bool>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(TemplateId::Modern, 1, SectionKey::ALL.to_vec(), BTreeMap::new())
    }
}

impl Layout {
    /// Builds a layout, repairing `order` and `visibility` into the invariant
    /// shape: duplicates dropped, missing keys appended in canonical order,
    /// missing visibility entries default to visible.
    pub fn new(
        template: TemplateId,
        columns: u8,
        order: Vec<SectionKey>,
        visibility: BTreeMap<SectionKey, bool>,
    ) -> Self {
        let mut seen = BTreeSet::new();
        let mut section_order: Vec<SectionKey> =
            order.into_iter().filter(|k| seen.insert(*k)).collect();
        for key in SectionKey::ALL {
            if seen.insert(key) {
                section_order.push(key);
            }
        }

        let section_visibility = SectionKey::ALL
            .into_iter()
            .map(|k| (k, visibility.get(&k).copied().unwrap_or(true)))
            .collect();

        Self {
            template,
            columns: columns.clamp(1, 2),
            section_order,
            section_visibility,
        }
    }

    pub fn section_order(&self) -> &[SectionKey] {
        &self.section_order
    }

    pub fn is_visible(&self, key: SectionKey) -> bool {
        self.section_visibility.get(&key).copied().unwrap_or(false)
    }

    pub fn set_visibility(&mut self, key: SectionKey, visible: bool) {
        self.section_visibility.insert(key, visible);
    }

    /// Visible sections in display order.
    pub fn visible_sections(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.section_order
            .iter()
            .copied()
            .filter(|k| self.is_visible(*k))
    }

    /// True when `section_order` holds every key exactly once.
    pub fn is_permutation(&self) -> bool {
        let unique: BTreeSet<_> = self.section_order.iter().collect();
        self.section_order.len() == SectionKey::ALL.len() && unique.len() == SectionKey::ALL.len()
    }

    /// Mutable access for permutation moves only.
    pub(crate) fn order_mut(&mut self) -> &mut Vec<SectionKey> {
        &mut self.section_order
    }
}

/// Wire form accepted on load. Keys are plain strings so a document written
/// by a newer client with sections this build doesn't know still loads.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLayout {
    #[serde(default)]
    template: TemplateId,
    #[serde(default = "default_columns")]
    columns: u8,
    #[serde(default)]
    section_order: Vec<String>,
    #[serde(default)]
    section_visibility: BTreeMap<String, bool>,
}

fn default_columns() -> u8 {
    1
}

impl From<RawLayout> for Layout {
    fn from(raw: RawLayout) -> Self {
        let order = raw
            .section_order
            .iter()
            .filter_map(|k| k.parse::<SectionKey>().ok())
            .collect();
        let visibility = raw
            .section_visibility
            .iter()
            .filter_map(|(k, v)| k.parse::<SectionKey>().ok().map(|key| (key, *v)))
            .collect();
        Layout::new(raw.template, raw.columns, order, visibility)
    }
}
