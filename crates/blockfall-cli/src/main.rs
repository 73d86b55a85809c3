mod command;
mod config;
mod input;
mod logging;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
