pub mod analyze_menu;

pub use analyze_menu::*;
