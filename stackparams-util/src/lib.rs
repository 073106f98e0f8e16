pub mod app_info;
pub mod logging;

#[cfg(feature = "settings")]
pub mod settings;
