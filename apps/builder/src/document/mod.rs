//! Resume document model: the single serializable root record edited by a session.

pub mod layout;
pub mod model;
pub mod seed;

pub use layout::{Layout, SectionKey, TemplateId};
pub use model::{
    parse_hex_color, Certification, Education, Experience, FontFamily, FontSize, Identified,
    Language, PersonalInfo, Project, ResumeDocument, Skills, Spacing, Theme,
};
pub use seed::seed_document;
