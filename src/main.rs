use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use storeicons::catalog::VariantClass;
use storeicons::config::{self, Preferences};
use storeicons::generate::{self, GenerateOptions, GenerateRequest};
use storeicons::imaging::RustBackend;
use storeicons::output;

#[derive(Parser)]
#[command(name = "storeicons")]
#[command(about = "Generate Microsoft Store app icons from one source image")]
#[command(long_about = "\
Generate Microsoft Store app icons from one source image

Variant classes:

  square   20 PNG logos (Square44x44Logo, Square150x150Logo, StoreLogo
           at every scale). Source must be square within 5%.
  wide     5 PNG logos (Wide310x150Logo at every scale). Sources off the
           310:150 ratio by more than 0.1 need --allow-aspect-mismatch.
  ico      One icon.ico holding 512, 256, 128, 64, 48, 32 and 16 px
           frames, largest first. Source must be square within 5%.

Every output is resampled with Lanczos3. Outputs under 128 px are sharpened,
and the source's ICC profile is embedded in every PNG.

The last source directory, output directory and variant are remembered in
preferences.toml (see 'storeicons config path').")]
#[command(version)]
struct Cli {
    /// Preferences file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every target of a variant class
    Generate {
        /// Source image (PNG, JPEG, BMP, GIF, TIFF, WebP or ICO)
        source: PathBuf,
        /// square, wide or ico (defaults to the last one used)
        #[arg(long, short)]
        variant: Option<VariantClass>,
        /// Output directory (defaults to the last one used)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Generate wide icons even when the source ratio is off
        #[arg(long)]
        allow_aspect_mismatch: bool,
        /// Print the final report as JSON instead of progress lines
        #[arg(long)]
        json: bool,
    },
    /// Check a source image's aspect ratio without rendering
    Check {
        source: PathBuf,
        #[arg(long, short)]
        variant: Option<VariantClass>,
    },
    /// List the targets of a variant class
    List {
        #[arg(long, short)]
        variant: Option<VariantClass>,
    },
    /// Inspect or reset stored preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the stored preferences
    Show,
    /// Print the preferences file location
    Path,
    /// Reset preferences to defaults
    Clear,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let prefs_path = match cli.config {
        Some(path) => path,
        None => config::default_path()?,
    };
    let mut prefs = load_preferences(&prefs_path);

    match cli.command {
        Command::Generate {
            source,
            variant,
            output,
            allow_aspect_mismatch,
            json,
        } => {
            let source = resolve_source(&source, &prefs);
            let output_dir = output
                .or_else(|| prefs.last_output_directory.clone())
                .ok_or("no output directory given (use --output)")?;
            let request = GenerateRequest {
                source,
                output_dir,
                class: variant.unwrap_or(prefs.last_variant),
                options: GenerateOptions {
                    allow_aspect_mismatch,
                },
            };

            let handle = generate::spawn_generation(RustBackend::new(), request.clone());
            for event in handle.events() {
                if !json {
                    output::print_generate_event(&event);
                }
            }
            let report = handle.join()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report);
            }

            prefs.remember_run(&request.source, &request.output_dir, request.class);
            if let Err(e) = prefs.save(&prefs_path) {
                eprintln!("Warning: could not save preferences: {e}");
            }
        }
        Command::Check { source, variant } => {
            let source = resolve_source(&source, &prefs);
            let class = variant.unwrap_or(prefs.last_variant);
            let check = generate::check_source(&RustBackend::new(), &source, class)?;
            output::print_check(&source, &check);
            if check.is_blocking() {
                return Err(format!("{} cannot be used for {}", source.display(), class).into());
            }
        }
        Command::List { variant } => {
            match variant {
                Some(class) => output::print_catalog(class),
                None => {
                    for (i, class) in VariantClass::ALL.into_iter().enumerate() {
                        if i > 0 {
                            println!();
                        }
                        output::print_catalog(class);
                    }
                }
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Show => output::print_preferences(&prefs_path, &prefs),
            ConfigAction::Path => println!("{}", prefs_path.display()),
            ConfigAction::Clear => {
                prefs.clear();
                prefs.save(&prefs_path)?;
                println!("Preferences reset: {}", prefs_path.display());
            }
        },
    }

    Ok(())
}

/// Load preferences, falling back to defaults when the file is unusable.
fn load_preferences(path: &Path) -> Preferences {
    Preferences::load(path).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring {}: {e}", path.display());
        Preferences::default()
    })
}

/// A bare relative name that doesn't exist here is looked up in the last
/// source directory.
fn resolve_source(source: &Path, prefs: &Preferences) -> PathBuf {
    if source.is_relative() && !source.exists() {
        if let Some(dir) = &prefs.last_source_directory {
            let candidate = dir.join(source);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    source.to_path_buf()
}
