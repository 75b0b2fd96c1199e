use std::process::ExitCode;

use roledep::cli;
use roledep::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}
