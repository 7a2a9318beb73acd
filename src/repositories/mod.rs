pub mod admin_repository;
pub mod carousel_repository;
pub mod instagram_repository;
pub mod otp_repository;
pub mod page_view_repository;
pub mod settings_repository;

pub use admin_repository::*;
pub use carousel_repository::*;
pub use instagram_repository::*;
pub use otp_repository::*;
pub use page_view_repository::*;
pub use settings_repository::*;
