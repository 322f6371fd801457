use std::collections::HashMap;
use std::fs;

use crate::log::log_level::LogLevel;

/// Section read by [`CodecConfig::from_config`].
pub const RTCP_SECTION: &str = "Rtcp";

/// INI-style key/value file: `# comments`, `[Section]` headers and
/// `key = value` lines. Keys before the first section are globals.
#[derive(Debug, Default)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Error reading file {path}: {e}"))?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_string();
                let value = value.trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    /// Section value, then global value, then `default`.
    #[must_use]
    pub fn get_or_default<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .unwrap_or(default)
    }

    #[must_use]
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self
            .get_or_default(section, key, "")
            .to_ascii_lowercase()
            .as_str()
        {
            "true" | "yes" | "on" | "1" => true,
            "false" | "no" | "off" | "0" => false,
            _ => default,
        }
    }
}

/// Options for [`FeedbackDemuxer`](crate::rtcp::demuxer::FeedbackDemuxer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Reject packets whose header version is not 2.
    pub strict_version: bool,
    /// Reject datagrams carrying bytes past the header-declared length.
    pub reject_trailing_bytes: bool,
    pub log_level: LogLevel,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_version: true,
            reject_trailing_bytes: false,
            log_level: LogLevel::Info,
        }
    }
}

impl CodecConfig {
    /// Reads the `[Rtcp]` section; missing or unparsable keys keep their defaults.
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        // An empty `log_level =` in the section falls back to the global key.
        let log_level = config
            .get_non_empty(RTCP_SECTION, "log_level")
            .or_else(|| config.get_global("log_level"))
            .and_then(LogLevel::parse)
            .unwrap_or(defaults.log_level);
        Self {
            strict_version: config.get_bool(RTCP_SECTION, "strict_version", defaults.strict_version),
            reject_trailing_bytes: config.get_bool(
                RTCP_SECTION,
                "reject_trailing_bytes",
                defaults.reject_trailing_bytes,
            ),
            log_level,
        }
    }
}
