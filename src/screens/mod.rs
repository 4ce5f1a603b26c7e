pub mod list;
pub mod templates;
pub mod trigger;

pub use list::{ListScreen, ListView};
pub use templates::{ListItem, ListItemTemplate, RenderContext};
pub use trigger::RefreshTrigger;
