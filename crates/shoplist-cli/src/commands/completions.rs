use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, generate_to, Shell};

use crate::cli::Cli;
use crate::error::CliError;

/// Write the completion script for `shell`.
///
/// A directory output gets the shell's conventional file name
/// (`shoplist.bash`, `_shoplist`, `shoplist.fish`); any other path is
/// written as given. Without an output the script goes to stdout.
pub fn run_completions(shell: Shell, output: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    match output {
        Some(dir) if dir.is_dir() => {
            let written = generate_to(shell, &mut command, &bin_name, dir)?;
            println!("{}", written.display());
        }
        Some(path) => {
            let mut script = Vec::new();
            generate(shell, &mut command, &bin_name, &mut script);
            std::fs::write(path, script)?;
            println!("{}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            generate(shell, &mut command, &bin_name, &mut stdout);
            stdout.flush()?;
        }
    }
    Ok(())
}
