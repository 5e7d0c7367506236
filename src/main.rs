use clap::Parser;
use linerotate::config;
use linerotate::gui::app::{AppInit, AppModel};
use linerotate::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "A row of line segments that rotate one at a time on tap", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Open in a regular window even if the config asks for fullscreen
    #[arg(short = 'w', long)]
    windowed: bool,

    /// Write the default config file (if missing) and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => Some(config::resolve_config_path(path)),
        None => match config::get_config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("{}, using built-in defaults", e);
                None
            }
        },
    };

    if args.write_config {
        let Some(path) = &config_path else {
            anyhow::bail!("No config location available");
        };
        let path = config::write_default_config(path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(config_path.as_deref());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    if let Some(path) = config_path.clone() {
        runtime::start_background_services(tx, path);
    }

    let app = RelmApp::new("org.linerotate.LineRotate").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        windowed: args.windowed,
        events: rx,
    });
    Ok(())
}
