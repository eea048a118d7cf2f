//! Entry point for the stagehand manager binary.

use stagehand::ui::output;

fn main() {
    if let Err(e) = stagehand::cli::run() {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
