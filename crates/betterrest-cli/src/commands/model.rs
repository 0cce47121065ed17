use std::path::PathBuf;

use clap::Subcommand;
use betterrest_core::{Config, LinearSleepModel, ModelFile};

#[derive(Subcommand)]
pub enum ModelAction {
    /// Print the configured model's coefficients
    Show {
        /// Model file to inspect instead of the configured one
        #[arg(long)]
        path: Option<PathBuf>,
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Write the bundled model to a file, as a starting point for edits
    Export {
        /// Destination path
        path: PathBuf,
    },
}

pub fn run(action: ModelAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ModelAction::Show { path, json } => {
            let path = path.or_else(|| {
                Config::load_or_default()
                    .model_path()
                    .map(PathBuf::from)
            });
            let model = match path {
                Some(path) => ModelFile::new(path).load()?,
                None => LinearSleepModel::bundled(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                print!("{}", model.to_toml()?);
            }
        }
        ModelAction::Export { path } => {
            let content = LinearSleepModel::bundled().to_toml()?;
            std::fs::write(&path, content)?;
            println!("model written to {}", path.display());
        }
    }
    Ok(())
}
