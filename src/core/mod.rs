//! Core infrastructure: settings, identity and error types

pub mod error;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use settings_persistence::{
    load_or_init_settings, load_settings, save_settings, settings_path, ClientSettings,
    DEFAULT_SERVER_URL,
};
