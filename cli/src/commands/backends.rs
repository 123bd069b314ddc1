use clap::Args as ClapArgs;
use color_eyre::eyre::Result;

use atelier_compiler::{BackendKind, GlobalSettings};

#[derive(ClapArgs, Debug)]
pub struct Args {}

pub fn exec(_args: Args) -> Result<()> {
    let settings = GlobalSettings::from_env();
    for kind in BackendKind::available() {
        let exts = kind
            .extensions()
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(" ");
        let tool = kind.backend().tool_name(&settings);
        println!("{:<14} {exts:<22} {tool}", kind.name());
    }
    Ok(())
}
