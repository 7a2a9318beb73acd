pub mod analytics;
pub mod auth;
pub mod carousel;
pub mod health;
pub mod instagram;
pub mod password_reset;
pub mod settings;
pub mod upload;

// Re-export all handler functions for easy importing
pub use analytics::*;
pub use auth::*;
pub use carousel::*;
pub use health::*;
pub use instagram::*;
pub use password_reset::*;
pub use settings::*;
pub use upload::*;
