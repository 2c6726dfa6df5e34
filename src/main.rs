// ABOUTME: Main entry point for the slide-deck program.
// ABOUTME: Provides a CLI for editing and inspecting a JSON deck file.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use deck::slide::{BODY_FONTS, DEFAULT_SLIDE_TITLE, HEADING_FONTS, THEME_COLORS};
use deck::utils::summarize;
use deck::{
    Config, DeckSession, JsonFileBackend, Presentation, PresentationTheme, Slide, SlideId,
    SlidePatch, SlideType, ThemePatch,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the deck file (defaults to $DECK_PATH or deck.json)
    #[arg(short, long, global = true)]
    deck: Option<PathBuf>,

    /// Log progress information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new deck file
    Init(InitArgs),

    /// Create a deck file from a markdown outline
    Import(ImportArgs),

    /// Write the deck as a markdown outline
    Export(ExportArgs),

    /// List slides in presentation order
    List,

    /// Append a new slide of the given type
    Add {
        /// title, content, code, quote or diagram
        #[arg(value_parser = parse_slide_type)]
        kind: SlideType,
    },

    /// Change fields of a slide
    Update(UpdateArgs),

    /// Delete a slide (the last slide cannot be deleted)
    Delete { id: String },

    /// Append a copy of a slide
    Duplicate { id: String },

    /// Move the slide at one position to another (1-based)
    Move { from: usize, to: usize },

    /// Show or change the presentation theme
    Theme(ThemeArgs),

    /// Show the slide at a 1-based position
    Show { position: String },
}

#[derive(Args)]
struct InitArgs {
    /// Seed the deck with the sample slides
    #[arg(long)]
    sample: bool,

    /// Name of the presentation
    #[arg(long)]
    name: Option<String>,

    /// Overwrite an existing deck file
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ImportArgs {
    /// Path to the markdown outline
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the deck file to create (defaults to --deck)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the markdown file to write (prints to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct UpdateArgs {
    id: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(long = "type", value_parser = parse_slide_type)]
    kind: Option<SlideType>,

    #[arg(long)]
    content: Option<String>,

    #[arg(long)]
    code: Option<String>,

    #[arg(long)]
    language: Option<String>,

    #[arg(long)]
    quote: Option<String>,

    #[arg(long)]
    author: Option<String>,

    #[arg(long)]
    diagram: Option<String>,
}

#[derive(Args)]
struct ThemeArgs {
    /// Primary color as an HSL triple, e.g. "221 83% 53%"
    #[arg(long, conflicts_with = "hex")]
    color: Option<String>,

    /// Primary color as a hex value, e.g. "#3b82f6"
    #[arg(long)]
    hex: Option<String>,

    #[arg(long)]
    heading_font: Option<String>,

    #[arg(long)]
    body_font: Option<String>,
}

fn parse_slide_type(s: &str) -> Result<SlideType, String> {
    s.parse::<SlideType>().map_err(|e| e.to_string())
}

fn open_session(path: &Path) -> anyhow::Result<DeckSession<JsonFileBackend>> {
    let backend = JsonFileBackend::open(path)
        .with_context(|| format!("Failed to open deck file {:?}", path))?;
    Ok(DeckSession::open(backend)?)
}

fn print_slide_line(position: usize, slide: &Slide) {
    println!(
        "{:>3}. [{:<7}] {}  {}",
        position,
        slide.kind,
        slide.id,
        summarize(&slide.title, 60)
    );
}

fn print_theme(theme: &PresentationTheme) {
    println!(
        "Primary color: {} ({})",
        theme.primary_color,
        deck::hsl_to_hex(&theme.primary_color)
    );
    println!("Heading font:  {}", theme.heading_font);
    println!("Body font:     {}", theme.body_font);
    for (name, value) in theme.css_variables() {
        println!("  {}: {};", name, value);
    }
}

fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let deck_path = cli.deck.unwrap_or_else(|| config.deck_path.clone());

    match cli.command {
        Some(Commands::Init(args)) => {
            if deck_path.exists() && !args.force {
                bail!("{:?} already exists, use --force to overwrite", deck_path);
            }
            let name = args.name.unwrap_or_else(|| config.deck_name.clone());
            let slides = if args.sample {
                deck::sample::sample_slides()
            } else {
                vec![Slide::new(SlideType::Title, DEFAULT_SLIDE_TITLE, 0)]
            };
            let count = slides.len();
            JsonFileBackend::create(
                &deck_path,
                Presentation::new(name, slides, PresentationTheme::default()),
            )?;
            println!("Created {:?} with {} slide(s)", deck_path, count);
        }
        Some(Commands::Import(args)) => {
            let outline = deck::import_markdown(&args.input)?;
            let output = args.output.unwrap_or(deck_path);
            let count = outline.slides.len();
            JsonFileBackend::create(
                &output,
                Presentation::new(outline.name, outline.slides, PresentationTheme::default()),
            )?;
            println!("Imported {} slide(s) into {:?}", count, output);
        }
        Some(Commands::Export(args)) => {
            let session = open_session(&deck_path)?;
            let outline = deck::export_outline(session.name(), session.store().sorted_slides());
            match args.output {
                Some(output) => {
                    deck::markdown::write_outline_to_file(&outline, &output)?;
                    println!("Outline written: {:?}", output);
                }
                None => print!("{}", outline),
            }
        }
        Some(Commands::List) => {
            let session = open_session(&deck_path)?;
            println!("{} ({} slides)", session.name(), session.store().len());
            for (index, slide) in session.store().sorted_slides().into_iter().enumerate() {
                print_slide_line(index + 1, slide);
            }
        }
        Some(Commands::Add { kind }) => {
            let mut session = open_session(&deck_path)?;
            let id = session.add_slide(kind)?;
            println!("Added {} slide {}", kind, id);
        }
        Some(Commands::Update(args)) => {
            let mut session = open_session(&deck_path)?;
            let patch = SlidePatch {
                title: args.title,
                kind: args.kind,
                content: args.content,
                code: args.code,
                language: args.language,
                quote: args.quote,
                author: args.author,
                diagram: args.diagram,
            };
            if patch.is_empty() {
                bail!("Nothing to update, pass at least one field");
            }
            let id = SlideId::from(args.id);
            if !session.update_slide(&id, &patch)? {
                bail!("Slide not found: {}", id);
            }
            println!("Updated slide {}", id);
        }
        Some(Commands::Delete { id }) => {
            let mut session = open_session(&deck_path)?;
            let id = SlideId::from(id);
            if session.store().slide(&id).is_none() {
                bail!("Slide not found: {}", id);
            }
            if !session.delete_slide(&id)? {
                bail!("Cannot delete the only slide of a deck");
            }
            println!("Deleted slide {}", id);
        }
        Some(Commands::Duplicate { id }) => {
            let mut session = open_session(&deck_path)?;
            let id = SlideId::from(id);
            match session.duplicate_slide(&id)? {
                Some(copy) => println!("Duplicated slide {} as {}", id, copy),
                None => bail!("Slide not found: {}", id),
            }
        }
        Some(Commands::Move { from, to }) => {
            let mut session = open_session(&deck_path)?;
            if from == 0 || to == 0 {
                bail!("Positions start at 1");
            }
            session.reorder_slides(from - 1, to - 1)?;
            println!("Moved slide {} to position {}", from, to);
        }
        Some(Commands::Theme(args)) => {
            let mut session = open_session(&deck_path)?;
            let primary_color = match (args.color, args.hex) {
                (Some(color), _) => Some(color),
                (None, Some(hex)) => Some(deck::hex_to_hsl(&hex)?),
                (None, None) => None,
            };
            let patch = ThemePatch {
                primary_color,
                heading_font: args.heading_font,
                body_font: args.body_font,
            };
            if patch.is_empty() {
                print_theme(session.store().theme());
                println!("Colors:");
                for color in THEME_COLORS {
                    println!("  {:<8} {}", color.name, color.value);
                }
                println!("Heading fonts:");
                for font in HEADING_FONTS {
                    println!("  {}", font.value);
                }
                println!("Body fonts:");
                for font in BODY_FONTS {
                    println!("  {}", font.value);
                }
            } else {
                session.update_theme(&patch)?;
                print_theme(session.store().theme());
            }
        }
        Some(Commands::Show { position }) => {
            let session = open_session(&deck_path)?;
            let navigator = session.navigator_for_route(&position)?;
            let state = navigator.state();
            let slide = session
                .store()
                .slide_at(state.current)
                .with_context(|| format!("Slide not found: {}", position))?;
            println!(
                "Slide {}/{} [{}] {}",
                state.current,
                state.total,
                slide.kind.label(),
                slide.title
            );
            println!();
            if !slide.content.is_empty() {
                println!("{}", slide.content);
            }
            match slide.kind {
                SlideType::Code => {
                    if let Some(code) = &slide.code {
                        println!("--- {} ---", slide.language.as_deref().unwrap_or("code"));
                        println!("{}", code);
                    }
                }
                SlideType::Quote => {
                    if let Some(quote) = &slide.quote {
                        println!("\"{}\"", quote);
                        if let Some(author) = &slide.author {
                            println!("  — {}", author);
                        }
                    }
                }
                SlideType::Diagram => {
                    if let Some(diagram) = &slide.diagram {
                        println!("{}", diagram);
                    }
                }
                SlideType::Title | SlideType::Content => {}
            }
            println!();
            if state.has_prev {
                println!("prev: {}", deck::route_for(state.current - 1));
            }
            if state.has_next {
                println!("next: {}", deck::route_for(state.current + 1));
            }
        }
        None => {
            println!("No command specified. Use --help for usage information.");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    if let Err(e) = run(cli, Config::from_env()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
