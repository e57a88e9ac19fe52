//! paintledger main entrypoint.

use paintledger::run;
use paintledger::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
