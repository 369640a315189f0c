use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            token: None,
        }
    }
}

/// Resolution order: defaults, then `console.toml`, then environment, then
/// command-line flags.
pub fn load_settings(server_url_flag: Option<String>, token_flag: Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("CONSOLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("CONSOLE_TOKEN") {
        settings.token = Some(v);
    }

    if let Some(v) = server_url_flag {
        settings.server_url = v;
    }
    if let Some(v) = token_flag {
        settings.token = Some(v);
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
        if let Some(v) = file_cfg.get("token") {
            settings.token = Some(v.clone());
        }
    }
}
