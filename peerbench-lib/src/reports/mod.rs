mod color_mode;
mod console;

pub use color_mode::ColorMode;
pub use console::{write_categories, write_comparison, write_mode_breakdown, write_national_trend, write_ranking, write_selection};
