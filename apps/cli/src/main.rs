//! update-just-skill — refresh `skills/justfile/SKILL.md` from the upstream
//! `just` README.
//!
//! Takes no arguments: the README URL, destination path, section keywords
//! and header marker are all built in.

mod commands;

use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    commands::init_tracing();
    commands::run().await
}
