//! Line formatting: templates, time patterns and color markup

mod style;
mod template;
mod time;

pub use style::{level_style, Markup};
pub use template::{Template, DEFAULT_FORMAT, DEFAULT_FORMAT_COLOR};
pub use time::{TimeFormat, DEFAULT_TIME_PATTERN};
