use anyhow::Context;
use clap::{Parser, Subcommand};
use namaz_cli::init_tracing;
use namaz_shia::quran::{
    AlQuranCloudClient, BundledContent, DEFAULT_BASE_URL, QuranContentProvider, Verse,
    WithFallback,
};

/// Browse Quran chapters, text and translation.
#[derive(Parser, Debug)]
#[command(author, version, about = "Quran chapters and verses")]
struct Cli {
    /// Use only the bundled offline content
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List chapters
    Chapters,
    /// Arabic text of a chapter
    Text { chapter: u32 },
    /// English translation of a chapter
    Translation { chapter: u32 },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.offline {
        return run(&BundledContent, &cli.command);
    }
    let client = AlQuranCloudClient::with_base_url(&cli.base_url)
        .with_context(|| format!("building client for {}", cli.base_url))?;
    run(&WithFallback::new(client), &cli.command)
}

fn run(provider: &dyn QuranContentProvider, command: &Command) -> anyhow::Result<()> {
    match *command {
        Command::Chapters => {
            for chapter in provider.list_chapters()? {
                println!(
                    "{:>3}. {} ({}) - {} ayahs, {}",
                    chapter.number,
                    chapter.english_name,
                    chapter.english_name_translation,
                    chapter.number_of_ayahs,
                    chapter.revelation_type
                );
            }
        }
        Command::Text { chapter } => print_verses(&provider.chapter_text(chapter)?),
        Command::Translation { chapter } => {
            print_verses(&provider.chapter_translation(chapter)?)
        }
    }
    Ok(())
}

fn print_verses(verses: &[Verse]) {
    for verse in verses {
        let marker = if verse.sajda { " [sajda]" } else { "" };
        println!("{:>3}. {}{marker}", verse.number_in_surah, verse.text);
    }
}
