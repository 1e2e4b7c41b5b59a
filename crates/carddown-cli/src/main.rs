use anyhow::{Context, Result};
use carddown_config::Config;
use carddown_engine::{Converter, HtmlPage, Rendered};
use clap::Parser;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Parser, Debug)]
#[command(author, version, about = "Converts Markdown with learning cards to HTML", long_about = None)]
struct Args {
    /// Markdown file to convert
    #[arg(required_unless_present = "write_config")]
    input: Option<PathBuf>,

    /// Output file or directory. Defaults to the input path with an `.html` extension
    output: Option<PathBuf>,

    /// Render the cards only, no markdown
    #[arg(short, long)]
    cards: bool,

    /// Render the cards in random order (implies --cards)
    #[arg(short, long)]
    shuffle: bool,

    /// Show card backsides instead of collapsing them
    #[arg(long, conflicts_with = "hide_answers")]
    show_answers: bool,

    #[arg(long)]
    hide_answers: bool,

    /// Document title. Derived from the file name if omitted
    #[arg(short, long)]
    title: Option<String>,

    /// Generate a table of contents
    #[arg(long, conflicts_with = "no_toc")]
    toc: bool,

    #[arg(long)]
    no_toc: bool,

    /// Deepest heading level listed in the table of contents
    #[arg(long)]
    toc_lvl: Option<u8>,

    #[arg(long)]
    lang: Option<String>,

    /// Default table alignment: left, center or right
    #[arg(long)]
    align: Option<String>,

    /// Stylesheet linked from the page
    #[arg(long)]
    css: Option<String>,

    /// Also export the cards as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Export raw markdown instead of plain text to JSON
    #[arg(long, requires = "json")]
    styles: bool,

    /// Extra config file, applied over the user config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Args {
    /// Command-line switches take precedence over config files.
    fn apply(&self, config: &mut Config) {
        if self.show_answers {
            config.cardloader.collapse = false;
        }
        if self.hide_answers {
            config.cardloader.collapse = true;
        }
        if self.toc {
            config.document.table_of_contents = true;
        }
        if self.no_toc {
            config.document.table_of_contents = false;
        }
        if let Some(level) = self.toc_lvl {
            config.document.toc_max_heading = level;
        }
        if let Some(lang) = &self.lang {
            config.document.lang = lang.clone();
        }
        if let Some(align) = &self.align {
            config.mdparser.table_align = align.clone();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    args.apply(&mut config);

    if let Some(path) = &args.write_config {
        config
            .save_to_path(path)
            .with_context(|| format!("Failed to write config to '{}'", path.display()))?;
        println!("Wrote config to '{}'", path.display());
        return Ok(());
    }

    let Some(input) = &args.input else {
        anyhow::bail!("An input file is required");
    };
    convert_file(&args, &config, input)
}

fn convert_file(args: &Args, config: &Config, input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let options = config.to_options();

    let mut parsed = Converter::new(&options)
        .parse(&text)
        .with_context(|| format!("Failed to convert '{}'", input.display()))?;
    let rendered: Rendered = if args.cards || args.shuffle {
        if args.shuffle {
            parsed.cards_mut().shuffle();
        }
        parsed.into_cards_only()
    } else {
        parsed.into_document()
    }
    .with_context(|| format!("Failed to convert '{}'", input.display()))?;
    log::info!(
        "{} cards, {} warnings",
        rendered.cards.len(),
        rendered.warnings.len()
    );

    if let Some(json_path) = &args.json {
        let json = rendered.cards.to_json(args.styles)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("Failed to write '{}'", json_path.display()))?;
        println!("Exported {} cards to '{}'", rendered.cards.len(), json_path.display());
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = args.title.clone().unwrap_or_else(|| title_from_name(&stem));
    let mut page = HtmlPage::new(title)
        .with_lang(&config.document.lang)
        .with_body_class(&config.document.body_class)
        .with_indent(options.indent_html);
    if let Some(css) = &args.css {
        page = page.with_head(format!(r#"<link rel="stylesheet" href="{css}">"#));
    }

    let output = output_path(input, args.output.as_deref());
    std::fs::write(&output, page.render(rendered.nodes))
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    println!("Converted '{}' to '{}'", input.display(), output.display());
    Ok(())
}

/// Reads `path` as UTF-8, replacing invalid sequences with a warning.
fn read_input(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            log::warn!(
                "'{}' is not valid UTF-8, invalid bytes are replaced",
                path.display()
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// `notes.md` becomes `notes.html` next to it; a directory output receives
/// `notes.html` inside it.
fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    let file_name = input.with_extension("html");
    match output {
        None => file_name,
        Some(dir) if dir.is_dir() => match file_name.file_name() {
            Some(name) => dir.join(name),
            None => dir.join("index.html"),
        },
        Some(path) => path.to_path_buf(),
    }
}

fn title_groups() -> &'static Regex {
    static GROUPS: OnceLock<Regex> = OnceLock::new();
    GROUPS.get_or_init(|| Regex::new(r"[a-zA-Z]+|[0-9]+").expect("Invalid title regex"))
}

/// `biology_2nd-exam` becomes `Biology 2 Nd Exam`.
fn title_from_name(name: &str) -> String {
    title_groups()
        .find_iter(name)
        .map(|group| {
            let mut chars = group.as_str().chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.map(|c| c.to_ascii_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
