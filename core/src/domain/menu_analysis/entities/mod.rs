pub mod analysis_result;
pub mod errors;
pub mod menu_image;
pub mod suggestion;
pub mod user_profile;

pub use analysis_result::*;
pub use errors::*;
pub use menu_image::*;
pub use suggestion::*;
pub use user_profile::*;
