//! Play command implementation - line-driven interactive encounter.

use super::output::{format_event, format_presentation, format_status};
use super::{CliError, EncounterOverrides};
use standoff::{Action, Encounter, EncounterConfig, Script};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  inc <stat>            add one to money, health, power or crime
  dec <stat>            subtract one
  adjust <stat> <n>     add n (may be negative)
  pass                  skip the fight
  fight                 fight the opponent
  status                show all stats
  help                  show this help
  quit                  leave the encounter";

/// Execute the play command.
///
/// Accepted actions are saved even when reading input fails part way.
///
/// # Errors
///
/// Returns an error if reading input or saving the script fails.
pub(crate) fn execute(overrides: EncounterOverrides, save: Option<&Path>) -> Result<(), CliError> {
    let config = overrides.apply(EncounterConfig::default());
    let color = io::stdout().is_terminal();
    let interactive = io::stdin().is_terminal();

    let mut encounter = Encounter::new(&config);
    let mut script = Script::new(config);

    println!("You face {}. Type 'help' for commands.", encounter.opponent().name());
    print!("{}", format_status(&encounter.snapshot()));

    let session = drive(
        io::stdin().lock(),
        &mut encounter,
        &mut script,
        color,
        interactive,
    );

    if let Some(path) = save {
        script.save(path)?;
        println!("Script saved to: {}", path.display());
    }

    session?;
    Ok(())
}

/// Read commands from `input` until it ends or the player quits.
///
/// Every accepted action is pushed onto `script` as it happens.
fn drive(
    input: impl BufRead,
    encounter: &mut Encounter,
    script: &mut Script,
    color: bool,
    interactive: bool,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();

        match line.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "status" => print!("{}", format_status(&encounter.snapshot())),
            _ => match line.parse::<Action>() {
                Ok(action) => {
                    let before = encounter.presentation();
                    match encounter.apply(action) {
                        Ok(event) => {
                            script.push(action);
                            println!("{}", format_event(&event, color));
                            let after = encounter.presentation();
                            if after != before {
                                println!("{}", format_presentation(after));
                            }
                        }
                        Err(e) => println!("Refused: {e}"),
                    }
                }
                Err(e) => println!("{e} (type 'help' for commands)"),
            },
        }
    }
}
