//! Settings slice reducers. Each setter replaces exactly one field.

use crate::models::{Currency, Language, Settings, SettingsPatch, Theme};
use tracing::debug;

impl Settings {
    pub fn set_language(&mut self, language: Language) {
        debug!(%language, "Language changed");
        self.language = language;
    }

    pub fn set_currency(&mut self, currency: Currency) {
        debug!(%currency, "Currency changed");
        self.currency = currency;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!(%theme, "Theme changed");
        self.theme = theme;
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        debug!(enabled, "Notifications toggled");
        self.notifications = enabled;
    }

    /// Applies every field present in `patch`.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(language) = patch.language {
            self.set_language(language);
        }
        if let Some(currency) = patch.currency {
            self.set_currency(currency);
        }
        if let Some(theme) = patch.theme {
            self.set_theme(theme);
        }
        if let Some(enabled) = patch.notifications {
            self.set_notifications(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_replace_single_field() {
        let mut settings = Settings::default();
        settings.set_currency(Currency::Eur);

        assert_eq!(settings.currency, Currency::Eur);
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.notifications);
    }

    #[test]
    fn test_apply_patch_keeps_absent_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            language: Some(Language::Tr),
            notifications: Some(false),
            ..SettingsPatch::default()
        });

        assert_eq!(settings.language, Language::Tr);
        assert!(!settings.notifications);
        assert_eq!(settings.currency, Currency::Usd);
    }
}
