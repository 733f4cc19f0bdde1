use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::profile::Settings;
use crate::render::{Colormap, DisplayMode};
use crate::runtime::{AppContext, run_segmentation};
use crate::segment::ModelKind;


#[derive(Debug, Parser)]
#[command(
    name = "cellseg",
    version,
    about = "Cell segmentation workbench for microscopy images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints decoded dimensions and sample information for an image.
    Info {
        input: PathBuf,
    },
    /// Segments an image and writes the result artifacts.
    Run {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        overrides: RunOverrides,
        /// Start from a saved profile instead of the defaults.
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    Models {
        #[command(subcommand)]
        command: ModelsCommand,
    },
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommand,
    },
    /// Launches the native window and preloads this image.
    View {
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum ModelsCommand {
    List,
}

#[derive(Debug, Subcommand)]
enum ProfilesCommand {
    List,
    Show { name: String },
}

/// Per-flag overrides for `run`, applied on top of the defaults or a
/// loaded profile.
#[derive(Debug, Clone, Default, Args)]
struct RunOverrides {
    /// Model preset: cyto3, cyto2, cyto or nuclei.
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    diameter: Option<f32>,
    #[arg(long)]
    flow_threshold: Option<f32>,
    /// Display channel for the result figure: RGB, Grayscale, Red, Green or Blue.
    #[arg(long)]
    display: Option<String>,
    /// Channel to segment, 0 means grayscale.
    #[arg(long)]
    channel1: Option<u8>,
    /// Optional second channel, for example a nuclear stain.
    #[arg(long)]
    channel2: Option<u8>,
    #[arg(long)]
    cmap: Option<String>,
}

impl RunOverrides {
    /// Folds the flags into the starting settings. Selecting a model
    /// falls back to its default diameter only when no diameter came
    /// from a profile or an explicit flag.
    fn apply(&self, mut settings: Settings, from_profile: bool) -> Result<Settings, String> {
        if let Some(value) = &self.model {
            settings.model_type = value
                .parse::<ModelKind>()
                .map_err(|error| error.to_string())?;
            if !from_profile && self.diameter.is_none() {
                settings.diameter = settings.model_type.default_diameter();
            }
        }
        if let Some(value) = self.diameter {
            settings.diameter = value;
        }
        if let Some(value) = self.flow_threshold {
            settings.flow_threshold = value;
        }
        if let Some(value) = &self.display {
            settings.display_channel = value
                .parse::<DisplayMode>()
                .map_err(|error| error.to_string())?;
        }
        if let Some(value) = self.channel1 {
            settings.seg_channel1 = value;
        }
        if let Some(value) = self.channel2 {
            settings.seg_channel2 = value;
        }
        if let Some(value) = &self.cmap {
            value
                .parse::<Colormap>()
                .map_err(|error| error.to_string())?;
            settings.cmap = value.clone();
        }
        Ok(settings)
    }
}

#[derive(Debug, Serialize)]
struct ImageInfo {
    width: usize,
    height: usize,
    channels: usize,
    sample_kind: String,
    source: String,
}

#[derive(Debug, Serialize)]
struct RunReport {
    cell_count: usize,
    summary: String,
    files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    id: String,
    description: String,
    default_diameter: f32,
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let app = AppContext::new();

    match cli.command {
        Commands::Info { input } => {
            let raw = app
                .io_service()
                .load(&input)
                .map_err(|error| error.to_string())?;
            let shape = raw.shape().to_vec();
            let (height, width, channels) = match shape[..] {
                [height, width] => (height, width, 1),
                [height, width, channels] => (height, width, channels),
                _ => return Err(format!("unexpected image shape {shape:?}")),
            };
            let info = ImageInfo {
                width,
                height,
                channels,
                sample_kind: raw.sample_kind().name().to_string(),
                source: input.display().to_string(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Run {
            input,
            overrides,
            profile,
            output_dir,
        } => {
            let app = match output_dir {
                Some(dir) => app.with_output_dir(dir),
                None => app,
            };

            let from_profile = profile.is_some();
            let settings = match profile {
                Some(name) => app
                    .profile_service()
                    .load(&name)
                    .map_err(|error| error.to_string())?,
                None => Settings::default(),
            };
            let settings = overrides.apply(settings, from_profile)?;

            let image = app
                .io_service()
                .load_normalized(&input)
                .map_err(|error| error.to_string())?;
            let outcome =
                run_segmentation(&app, &image, &settings).map_err(|error| error.to_string())?;
            let report = RunReport {
                cell_count: outcome.cell_count,
                summary: outcome.summary,
                files: outcome.bundle.files,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).map_err(|error| error.to_string())?
            );
        }
        Commands::Models { command } => match command {
            ModelsCommand::List => {
                let models = ModelKind::ALL
                    .iter()
                    .map(|model| ModelInfo {
                        id: model.id().to_string(),
                        description: model.description().to_string(),
                        default_diameter: model.default_diameter(),
                    })
                    .collect::<Vec<_>>();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&models).map_err(|error| error.to_string())?
                );
            }
        },
        Commands::Profiles { command } => match command {
            ProfilesCommand::List => {
                let profiles = app.profile_service().list();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&profiles).map_err(|error| error.to_string())?
                );
            }
            ProfilesCommand::Show { name } => {
                let settings = app
                    .profile_service()
                    .load(&name)
                    .map_err(|error| error.to_string())?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&settings).map_err(|error| error.to_string())?
                );
            }
        },
        Commands::View { input } => {
            crate::ui::run(input)?;
        }
    }

    Ok(())
}
