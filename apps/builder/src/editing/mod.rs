//! Document editing: typed edits, list insert/remove, moves, and undo history.

pub mod edit;
pub mod history;
pub mod list;
pub mod mutator;
pub mod reorder;

pub use edit::{
    CertificationEdit, Edit, EducationEdit, ExperienceEdit, LanguageEdit, LayoutEdit,
    PersonalField, ProjectEdit, SkillKind, ThemeEdit,
};
pub use history::History;
pub use list::{ListItem, ListPath};
pub use mutator::{add_list_item, remove_list_item, set};
pub use reorder::{move_list_item, move_section};
