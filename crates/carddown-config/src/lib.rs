//! Layered TOML configuration.
//!
//! Defaults are overridden key by key by each config file that exists, in
//! order: the user file, then an explicitly requested one. Keys that are
//! unknown or carry a value of the wrong TOML type are skipped with a warning.

use carddown_engine::{Labels, Options, TableAlign};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdParserConfig {
    pub table_align: String,
    pub prettyprint_inline_code: bool,
    pub prettyprint_multiline_code: bool,
    pub ignore_inline_tokens: Vec<String>,
    pub tabsize: usize,
    pub checkbox_disabled: bool,
    pub list_item_chars: Vec<String>,
    pub ignore_empty_lines: bool,
}

impl Default for MdParserConfig {
    fn default() -> Self {
        Self {
            table_align: "left".into(),
            prettyprint_inline_code: false,
            prettyprint_multiline_code: false,
            ignore_inline_tokens: Vec::new(),
            tabsize: 4,
            checkbox_disabled: true,
            list_item_chars: vec!["-".into(), "+".into(), "*".into()],
            ignore_empty_lines: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardLoaderConfig {
    /// Element placed after every card; empty for none.
    pub card_separator: String,
    pub collapse: bool,
    /// 0 turns the warning off.
    pub length_warning: usize,
}

impl Default for CardLoaderConfig {
    fn default() -> Self {
        Self {
            card_separator: "hr".into(),
            collapse: true,
            length_warning: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub table_of_contents: bool,
    pub toc_max_heading: u8,
    pub toc_include_cards: bool,
    pub toc_max_heading_cards: u8,
    pub toc_show_back_headings_cards: bool,
    pub prerender_latex: bool,
    pub image_max_width: String,
    pub indent_html: usize,
    pub body_class: String,
    pub codeblock_copy_btn: bool,
    pub lang: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            table_of_contents: true,
            toc_max_heading: 3,
            toc_include_cards: true,
            toc_max_heading_cards: 1,
            toc_show_back_headings_cards: false,
            prerender_latex: false,
            image_max_width: "80%".into(),
            indent_html: 2,
            body_class: "markdown-body".into(),
            codeblock_copy_btn: true,
            lang: "en".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mdparser: MdParserConfig,
    pub cardloader: CardLoaderConfig,
    pub document: DocumentConfig,
}

impl Config {
    /// Defaults, then the user file if present, then `explicit`, which must
    /// exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_layers(&Self::config_path(), explicit)
    }

    pub fn load_layers(user: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if user.exists() {
            config.merge_file(user)?;
        }
        if let Some(path) = explicit {
            let path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            config.merge_file(&path)?;
        }
        Ok(config)
    }

    /// Merges one config file over the current values and returns the keys
    /// that were skipped.
    pub fn merge_file(&mut self, config_path: &Path) -> Result<Vec<String>, ConfigError> {
        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;
        let parse_error = |source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        };
        let layer: toml::Table = toml::from_str(&content).map_err(parse_error)?;

        let mut current = toml::Table::try_from(&*self)?;
        let mut skipped = Vec::new();
        for (section, values) in layer {
            let (Some(toml::Value::Table(target)), toml::Value::Table(values)) =
                (current.get_mut(&section), values)
            else {
                skipped.push(section);
                continue;
            };
            for (key, value) in values {
                match target.get(&key) {
                    Some(old) if old.type_str() == value.type_str() => {
                        target.insert(key, value);
                    }
                    _ => skipped.push(format!("{section}.{key}")),
                }
            }
        }
        *self = current.try_into().map_err(parse_error)?;

        for key in &skipped {
            log::warn!("{}: ignoring config value '{key}'", config_path.display());
        }
        log::debug!("loaded config from {}", config_path.display());
        Ok(skipped)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/carddown");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// The engine's snapshot of this configuration. Values the engine cannot
    /// use fall back to their defaults with a warning.
    pub fn to_options(&self) -> Options {
        let defaults = Options::default();
        let md = &self.mdparser;
        let cards = &self.cardloader;
        let doc = &self.document;

        let table_align = md.table_align.parse::<TableAlign>().unwrap_or_else(|e| {
            log::warn!("{e}, using '{}'", defaults.table_align);
            defaults.table_align
        });
        let list_item_chars = md
            .list_item_chars
            .iter()
            .filter_map(|s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        log::warn!("list item marker '{s}' is not a single character");
                        None
                    }
                }
            })
            .collect();
        let labels = Labels::for_lang(&doc.lang).unwrap_or_else(|| {
            log::warn!(
                "unknown language '{}' (available: {}), using 'en'",
                doc.lang,
                Labels::LANGUAGES.join(", ")
            );
            Labels::english()
        });

        Options {
            list_item_chars,
            ignore_empty_lines: md.ignore_empty_lines,
            table_align,
            ignore_inline_tokens: md.ignore_inline_tokens.clone(),
            tabsize: md.tabsize,
            checkbox_disabled: md.checkbox_disabled,
            prettyprint_inline_code: md.prettyprint_inline_code,
            prettyprint_multiline_code: md.prettyprint_multiline_code,
            prerender_latex: doc.prerender_latex,
            image_max_width: doc.image_max_width.clone(),
            codeblock_copy_btn: doc.codeblock_copy_btn,
            collapse: cards.collapse,
            length_warning: (cards.length_warning > 0).then_some(cards.length_warning),
            card_separator: (!cards.card_separator.is_empty())
                .then(|| cards.card_separator.clone()),
            table_of_contents: doc.table_of_contents,
            toc_max_heading: doc.toc_max_heading,
            toc_include_cards: doc.toc_include_cards,
            toc_max_heading_cards: doc.toc_max_heading_cards,
            toc_show_back_headings_cards: doc.toc_show_back_headings_cards,
            indent_html: doc.indent_html,
            labels,
        }
    }
}
