use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "atelier", version, about = "Atelier — dispatch des compilateurs externes", long_about = None)]
pub struct Cli {
    /// Verbosité (répéter pour plus de bruit)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compiler un fichier via le backend correspondant à son extension
    Compile(commands::compile::Args),

    /// Lister les backends disponibles (extensions, outil résolu)
    Backends(commands::backends::Args),
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose > 0 {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.cmd {
        Cmd::Compile(a) => commands::compile::exec(a),
        Cmd::Backends(a) => commands::backends::exec(a),
    }
}
