use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;

use ringbar::{ReplContext, commands, logging, readline};

fn main() -> Result<(), String> {
    logging::init();

    let mut ctx = ReplContext::load();
    commands::spawn(&mut ctx, true);

    loop {
        let Some(line) = readline()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Drive headless progress widgets on a virtual clock")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> Self {
        matches!(switch, Switch::On)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Add a widget
    Spawn {
        /// Build the reduced variant without a rotate control
        #[arg(long)]
        no_rotate: bool,
    },
    /// Set a widget's value from raw input (e.g. 50, "150", "abc")
    Set {
        index: usize,
        #[arg(allow_hyphen_values = true)]
        raw: String,
    },
    Animate {
        index: usize,
        switch: Switch,
    },
    Rotate {
        index: usize,
        switch: Switch,
    },
    Hide {
        index: usize,
        switch: Switch,
    },
    Reset {
        index: usize,
    },
    /// Move the virtual clock forward (250ms, 2s, or plain milliseconds)
    Advance {
        duration: String,
    },
    Show {
        index: Option<usize>,
    },
    Config,
    Exit,
}

fn respond(line: &str, ctx: &mut ReplContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "ringbar".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let result = match &cli.command {
        Some(Commands::Spawn { no_rotate }) => {
            commands::spawn(ctx, !no_rotate);
            Ok(())
        }
        Some(Commands::Set { index, raw }) => commands::set_value(ctx, *index, raw),
        Some(Commands::Animate { index, switch }) => {
            commands::animate(ctx, *index, (*switch).into())
        }
        Some(Commands::Rotate { index, switch }) => commands::rotate(ctx, *index, (*switch).into()),
        Some(Commands::Hide { index, switch }) => commands::hide(ctx, *index, (*switch).into()),
        Some(Commands::Reset { index }) => commands::reset(ctx, *index),
        Some(Commands::Advance { duration }) => commands::advance(ctx, duration),
        Some(Commands::Show { index }) => commands::show(ctx, *index),
        Some(Commands::Config) => {
            commands::show_config(ctx);
            Ok(())
        }
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => Ok(()),
    };
    result.map_err(|e| e.to_string())?;
    Ok(false)
}
