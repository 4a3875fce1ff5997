//! Configuration module

mod settings;

pub use settings::AuthConfig;
pub use settings::CmsConfig;
pub use settings::ContentConfig;
pub use settings::Environment;
pub use settings::GithubConfig;
pub use settings::ServerConfig;
