use crate::desk::Desk;
use crate::error::AppResult;
use crate::models::AppSettings;
use crate::state::Action;

pub fn get_settings(desk: &Desk) -> AppSettings {
    desk.store.state().settings.clone()
}

/// Returns the new dark mode flag.
pub fn toggle_dark_mode(desk: &mut Desk) -> bool {
    desk.store.dispatch(Action::ToggleDarkMode);
    desk.store.state().dark_mode
}

#[derive(Debug, Default, Clone)]
pub struct SettingsUpdate {
    pub language: Option<String>,
    pub currency: Option<String>,
    pub notifications: Option<bool>,
}

pub fn update_settings(desk: &mut Desk, update: SettingsUpdate) -> AppSettings {
    let mut settings = get_settings(desk);

    if let Some(language) = update.language {
        settings.language = language;
    }
    if let Some(currency) = update.currency {
        settings.currency = currency;
    }
    if let Some(notifications) = update.notifications {
        settings.notifications = notifications;
    }

    desk.store.dispatch(Action::SetSettings(settings.clone()));
    settings
}

pub fn export_data(desk: &Desk) -> AppResult<String> {
    desk.store.storage().export_data()
}

/// Writes the bundle to storage and reloads the store from it. Returns
/// `false` when the bundle is malformed.
pub fn import_data(desk: &mut Desk, data: &str) -> bool {
    if !desk.store.storage().import_data(data) {
        return false;
    }

    desk.store.reload();
    tracing::info!("data imported");
    true
}
