use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use shoplist_core::ShoppingListStore;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::{Flow, Session};

const PROMPT: &str = "shoplist> ";

pub async fn run_session(config: &CliConfig, script: Option<&Path>) -> Result<(), CliError> {
    let store = ShoppingListStore::with_config(&config.store)?;
    let mut session = Session::new(store, config.share_sheet()?, config.render_after_change);
    let mut stdout = io::stdout();

    if let Some(path) = script {
        tracing::debug!(path = %path.display(), "running session script");
        let script = std::fs::read_to_string(path)?;
        for line in script.lines() {
            if session.execute(line, &mut stdout).await? == Flow::Quit {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("Shopping List (type `help` for commands)");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{PROMPT}");
            stdout.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if session.execute(&line?, &mut stdout).await? == Flow::Quit {
            break;
        }
    }

    Ok(())
}
