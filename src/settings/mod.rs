pub mod errors;

use std::fs;
use std::path::Path;

use comfy_table::Color;
use serde::Deserialize;

use crate::args::Args;
use crate::dataset::MATERIAL_NUMBER;
use errors::SettingsError;

/// Background used for duplicate rows in the analysis table.
pub const DEFAULT_HIGHLIGHT: &str = "#F09A88";

/// Run settings. Read from an optional toml/yaml/json file, then overridden
/// by command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub key: String,
    pub sheet: Option<String>,
    pub delimiter: char,
    pub out: String,
    pub index: bool,
    pub highlight: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key: MATERIAL_NUMBER.to_string(),
            sheet: None,
            delimiter: ',',
            out: ".".to_string(),
            index: true,
            highlight: DEFAULT_HIGHLIGHT.to_string(),
        }
    }
}

pub fn load_settings(filename: &str) -> Result<Settings, SettingsError> {
    let text = fs::read_to_string(filename)
        .map_err(|_| SettingsError::FileError(format!("failed to open file: {}", filename)))?;

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parse_err =
        |e: String| SettingsError::FileError(format!("failed to parse file {}: {}", filename, e));

    let settings: Settings = match ext.as_str() {
        "toml" => toml::from_str(&text).map_err(|e| parse_err(e.to_string()))?,
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| parse_err(e.to_string()))?,
        "json" => serde_json::from_str(&text).map_err(|e| parse_err(e.to_string()))?,
        _ => return Err(SettingsError::UnsupportedFormat(filename.to_string())),
    };

    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Settings file (if any) with command-line overrides applied.
    pub fn resolve(args: &Args) -> Result<Self, SettingsError> {
        let mut settings = match &args.config {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };

        if let Some(key) = &args.input.key {
            settings.key = key.clone();
        }
        if let Some(sheet) = &args.input.sheet {
            settings.sheet = Some(sheet.clone());
        }
        if let Some(delimiter) = args.input.delimiter {
            settings.delimiter = delimiter;
        }
        if let Some(out) = &args.output.out {
            settings.out = out.clone();
        }
        if args.output.no_index {
            settings.index = false;
        }
        if let Some(highlight) = &args.output.highlight {
            settings.highlight = highlight.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.key.trim().is_empty() {
            return Err(SettingsError::InvalidValue {
                name: "key".to_string(),
                reason: "key column name is empty".to_string(),
            });
        }
        self.delimiter_byte()?;
        self.highlight_color()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, SettingsError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|&b| b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r'))
            .ok_or_else(|| SettingsError::InvalidValue {
                name: "delimiter".to_string(),
                reason: format!("'{}' is not a usable single-byte delimiter", self.delimiter),
            })
    }

    pub fn highlight_color(&self) -> Result<Color, SettingsError> {
        parse_hex_color(&self.highlight).ok_or_else(|| SettingsError::InvalidValue {
            name: "highlight".to_string(),
            reason: format!("expected #RRGGBB, got '{}'", self.highlight),
        })
    }
}

fn parse_hex_color(text: &str) -> Option<Color> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
