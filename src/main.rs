use anyhow::Result;
use finder::cli;

fn main() -> Result<()> {
    let result = cli::process_cli();
    if let Err(ref e) = result {
        log::error!("finder failed: {e:#}");
    }
    result
}
