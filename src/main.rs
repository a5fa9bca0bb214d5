mod app;
mod audio;
mod catalog;
mod config;
mod error;
mod logging;
mod navigation;
mod player;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
