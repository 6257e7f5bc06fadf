use std::io;
use std::process::ExitCode;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::{default_log_path, init_file_logger};
use wordle_game::tui::TuiInterface;
use wordle_game::{GameError, game_loop};

fn run() -> Result<(), GameError> {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_file_logger(&path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", path.display());
    }
    log::info!(
        "wordle-game starting: {:?}, plain={}",
        cli.settings(),
        cli.plain
    );

    let today = chrono::Local::now().date_naive();
    let mut picker = cli.word_picker(today)?;
    let settings = cli.settings();

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut picker, settings, &mut interface)
    } else {
        // Dropping the interface restores the terminal
        let mut interface = TuiInterface::new()?;
        game_loop(&mut picker, settings, &mut interface)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
