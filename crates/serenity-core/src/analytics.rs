//! Usage-event facade.
//!
//! Screens report coarse product events here; the facade encodes them and
//! hands them to the `log` output. Delivery to a real analytics backend is
//! the host's concern, same as audio playback.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product events the app reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    SessionStarted,
    SessionCompleted,
    SoundSelected,
    ThemeChanged,
    AppOpened,
    AppBackgrounded,
}

impl EventName {
    fn as_str(self) -> &'static str {
        match self {
            EventName::SessionStarted => "session_started",
            EventName::SessionCompleted => "session_completed",
            EventName::SoundSelected => "sound_selected",
            EventName::ThemeChanged => "theme_changed",
            EventName::AppOpened => "app_opened",
            EventName::AppBackgrounded => "app_backgrounded",
        }
    }
}

/// Event sink, constructed explicitly and handed to whatever reports
/// events. Disabled instances swallow everything, for hosts that opt out.
#[derive(Debug, Clone)]
pub struct Analytics {
    enabled: bool,
}

impl Analytics {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// A sink that drops every event.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Report a product event with optional JSON properties.
    pub fn log_event(&self, event: EventName, properties: Option<&Value>) {
        if !self.enabled {
            return;
        }
        match properties {
            Some(props) => log::info!(target: "serenity::analytics", "{} {props}", event.as_str()),
            None => log::info!(target: "serenity::analytics", "{}", event.as_str()),
        }
    }

    /// Report a screen view.
    pub fn log_screen(&self, screen_name: &str) {
        if !self.enabled {
            return;
        }
        log::info!(target: "serenity::analytics", "screen_view {screen_name}");
    }

    /// Attach a property to the current user.
    pub fn set_user_property(&self, name: &str, value: impl Into<Value>) {
        if !self.enabled {
            return;
        }
        log::info!(
            target: "serenity::analytics",
            "user_property {name}={}",
            value.into()
        );
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_serialize_snake_case() {
        let json = serde_json::to_string(&EventName::SessionCompleted).unwrap();
        assert_eq!(json, "\"session_completed\"");
        assert_eq!(EventName::AppOpened.as_str(), "app_opened");
    }

    #[test]
    fn disabled_sink_is_silent() {
        // No logger is installed in tests; this just exercises the paths.
        let analytics = Analytics::disabled();
        analytics.log_event(EventName::AppOpened, None);
        analytics.log_screen("Home");
        analytics.set_user_property("darkMode", true);
    }
}
