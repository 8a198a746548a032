pub mod settings;

pub use settings::{ClickUpSettings, EventListenerType, IntegrationSettings, ServerSettings, Settings};
