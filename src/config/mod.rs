//! Configuration module

mod site;

pub use site::ApiEnvironment;
pub use site::SiteConfig;
pub use site::StoreConfig;
