use std::path::PathBuf;

use clap::{Parser, Subcommand};
use namaz_cli::{DEFAULT_STORE_PATH, init_tracing, open_store};
use namaz_shia::tracker::{PHASES, TapOutcome, TasbeehCounter};

/// Tasbeeh of Fatima (sa) counter.
#[derive(Parser, Debug)]
#[command(author, version, about = "Tasbeeh counter: 33 + 33 + 34")]
struct Cli {
    /// Settings file holding the counter state
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count one or more recitations
    Tap {
        #[arg(default_value_t = 1)]
        times: u32,
    },
    /// Print the current phase and count
    Show,
    /// Start again from the first phase
    Reset,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut store = open_store(&cli.store)?;
    let mut counter = TasbeehCounter::load(&store);

    match cli.command {
        Command::Show => {}
        Command::Reset => {
            counter.reset();
            counter.save(&mut store)?;
        }
        Command::Tap { times } => {
            for _ in 0..times {
                match counter.tap() {
                    TapOutcome::PhaseAdvanced { phase } => {
                        println!("Next: {}", PHASES[phase].transliteration);
                    }
                    TapOutcome::Completed => println!("Tasbeeh complete"),
                    TapOutcome::Ignored => {
                        println!("Already complete; reset to start again");
                        break;
                    }
                    TapOutcome::Counted { .. } => {}
                }
            }
            counter.save(&mut store)?;
        }
    }

    let phase = counter.phase();
    println!(
        "Phase {}/{}: {} ({}) {}/{}",
        counter.phase_index() + 1,
        PHASES.len(),
        phase.transliteration,
        phase.meaning,
        counter.count(),
        phase.target
    );
    println!("Total {}/100", counter.total());
    Ok(())
}
