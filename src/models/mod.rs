// Re-export all models organized by domain
pub mod admin;
pub mod analytics;
pub mod carousel;
pub mod errors;
pub mod instagram;
pub mod otp;
pub mod page_view;
pub mod request;
pub mod response;
pub mod settings;

pub use admin::*;
pub use analytics::*;
pub use carousel::*;
pub use errors::*;
pub use instagram::*;
pub use otp::*;
pub use page_view::*;
pub use request::*;
pub use response::*;
pub use settings::*;
