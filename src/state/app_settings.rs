use liga_api::Locale;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User-facing settings. Locale and fullscreen persist to a JSON file under
/// the config directory; the rest come from the environment per run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub locale: Locale,
    pub full_screen: bool,
    pub site_base: Option<String>,
    #[serde(skip)]
    pub api_base: Option<String>,
    #[serde(skip)]
    pub log_level: Option<LevelFilter>,
    #[serde(skip)]
    pub startup_discount: Option<String>,
}

impl AppSettings {
    pub fn load() -> Self {
        let mut settings = settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|raw| serde_json::from_str::<AppSettings>(&raw).ok())
            .unwrap_or_default();

        if let Ok(base) = std::env::var("LIGA_API_BASE")
            && !base.trim().is_empty()
        {
            settings.api_base = Some(base.trim().to_owned());
        }
        if let Ok(base) = std::env::var("LIGA_SITE_BASE")
            && !base.trim().is_empty()
        {
            settings.site_base = Some(base.trim().to_owned());
        }
        if let Ok(code) = std::env::var("LIGATUI_LOCALE")
            && let Some(locale) = Locale::from_code(code.trim())
        {
            settings.locale = locale;
        }
        if let Ok(code) = std::env::var("LIGATUI_DISCOUNT")
            && !code.trim().is_empty()
        {
            settings.startup_discount = Some(code.trim().to_owned());
        }
        settings
    }

    /// Share links point at the public site, not the API.
    pub fn site_base(&self) -> &str {
        self.site_base.as_deref().unwrap_or("https://ligadetenis.es")
    }

    /// Best-effort persistence. Losing a settings write costs one locale
    /// toggle, never data.
    pub fn save(&self) {
        let Some(path) = settings_path() else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("could not create settings dir: {e}");
            return;
        }
        match serde_json::to_string_pretty(self) {
            Ok(raw) => {
                if let Err(e) = std::fs::write(&path, raw) {
                    warn!("could not write settings: {e}");
                }
            }
            Err(e) => warn!("could not serialize settings: {e}"),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/ligatui/settings.json"))
}
