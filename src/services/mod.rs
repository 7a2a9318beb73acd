pub mod analytics_service;
pub mod auth_service;
pub mod carousel_service;
pub mod email_service;
pub mod instagram_service;
pub mod password_reset_service;
pub mod settings_service;
pub mod upload_service;

pub use analytics_service::*;
pub use auth_service::*;
pub use carousel_service::*;
pub use email_service::*;
pub use instagram_service::*;
pub use password_reset_service::*;
pub use settings_service::*;
pub use upload_service::*;
