//! barrelcad CLI - parametric dart barrel designer
//!
//! Creates, inspects, edits and exports barrel design documents.

use anyhow::{bail, Context, Result};
use barrelcad_kernel::barrelcad_ir::{DEFAULT_DEPTH, DEFAULT_PITCH};
use barrelcad_kernel::layout::{edit_cut, find_free_slot};
use barrelcad_kernel::{
    Barrel, BarrelDesign, CutKind, CutUpdate, CutZone, Dimension, KernelConfig, ShapeType,
    WizardSpec,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod export;

#[derive(Parser)]
#[command(name = "barrelcad")]
#[command(about = "Parametric dart barrel designer", long_about = None)]
struct Cli {
    /// Kernel resolution settings (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a design from setup answers
    New {
        /// Output design file (.json)
        output: PathBuf,
        /// Overall length (mm)
        #[arg(long, default_value_t = 45.0)]
        length: f64,
        /// Maximum diameter (mm)
        #[arg(long, default_value_t = 7.0)]
        diameter: f64,
        /// Tungsten content (%)
        #[arg(long, default_value_t = 90.0)]
        tungsten: f64,
        /// Barrel silhouette
        #[arg(long, value_enum, default_value_t = ShapeArg::Torpedo)]
        shape: ShapeArg,
        /// Front taper length (mm), torpedo only
        #[arg(long, default_value_t = 15.0)]
        front_taper: f64,
        /// Rear taper length (mm), torpedo only
        #[arg(long, default_value_t = 15.0)]
        rear_taper: f64,
        /// Front bore depth (mm)
        #[arg(long, default_value_t = 10.0)]
        front_bore: f64,
        /// Rear bore depth (mm)
        #[arg(long, default_value_t = 15.0)]
        rear_bore: f64,
    },
    /// Change overall dimensions
    Set {
        /// Design file, rewritten in place
        design: PathBuf,
        #[command(flatten)]
        dims: DimensionArgs,
    },
    /// Display dimensions, cuts and physical properties
    Info {
        /// Design file
        design: PathBuf,
        /// Print physical properties as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the profile curve as z,radius CSV
    Profile {
        /// Design file
        design: PathBuf,
    },
    /// Export the barrel mesh as binary STL
    Export {
        /// Design file
        design: PathBuf,
        /// Output file (.stl)
        output: PathBuf,
    },
    /// Place a cut in the first free slot
    AddCut {
        /// Design file, rewritten in place
        design: PathBuf,
        /// Cut kind (ring, ring_double, ring_triple, ring_v, ring_r, scallop,
        /// canyon, shark, wing, step, stair, micro, vertical)
        #[arg(short, long)]
        kind: CutKind,
        /// Zone width (mm)
        #[arg(short, long, default_value_t = 10.0)]
        width: f64,
        /// Pattern pitch (mm)
        #[arg(long)]
        pitch: Option<f64>,
        /// Cut depth (mm)
        #[arg(long)]
        depth: Option<f64>,
        /// Groove count for vertical cuts
        #[arg(long)]
        count: Option<u32>,
    },
    /// Move, resize or retype an existing cut
    EditCut {
        /// Design file, rewritten in place
        design: PathBuf,
        /// Cut id
        id: String,
        /// New cut kind
        #[arg(short, long)]
        kind: Option<CutKind>,
        /// New zone start (mm)
        #[arg(long)]
        start: Option<f64>,
        /// New zone end (mm)
        #[arg(long)]
        end: Option<f64>,
        /// New pattern pitch (mm)
        #[arg(long)]
        pitch: Option<f64>,
        /// New cut depth (mm)
        #[arg(long)]
        depth: Option<f64>,
        /// New groove count for vertical cuts
        #[arg(long)]
        count: Option<u32>,
    },
    /// Remove a cut by id
    RemoveCut {
        /// Design file, rewritten in place
        design: PathBuf,
        /// Cut id
        id: String,
    },
}

#[derive(Args)]
struct DimensionArgs {
    /// Overall length (mm)
    #[arg(long)]
    length: Option<f64>,
    /// Maximum diameter (mm)
    #[arg(long)]
    diameter: Option<f64>,
    /// Front taper length (mm)
    #[arg(long)]
    front_taper: Option<f64>,
    /// Rear taper length (mm)
    #[arg(long)]
    rear_taper: Option<f64>,
    /// Front bore depth (mm)
    #[arg(long)]
    front_bore: Option<f64>,
    /// Rear bore depth (mm)
    #[arg(long)]
    rear_bore: Option<f64>,
    /// Material density (g/cm³)
    #[arg(long)]
    density: Option<f64>,
}

impl DimensionArgs {
    /// The dimensions given on the command line.
    fn edits(&self) -> Vec<(Dimension, f64)> {
        [
            (Dimension::Length, self.length),
            (Dimension::MaxDiameter, self.diameter),
            (Dimension::FrontTaperLength, self.front_taper),
            (Dimension::RearTaperLength, self.rear_taper),
            (Dimension::HoleDepthFront, self.front_bore),
            (Dimension::HoleDepthRear, self.rear_bore),
            (Dimension::MaterialDensity, self.density),
        ]
        .into_iter()
        .filter_map(|(dim, value)| value.map(|v| (dim, v)))
        .collect()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Torpedo,
    Straight,
}

impl From<ShapeArg> for ShapeType {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Torpedo => ShapeType::Torpedo,
            ShapeArg::Straight => ShapeType::Straight,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::New {
            output,
            length,
            diameter,
            tungsten,
            shape,
            front_taper,
            rear_taper,
            front_bore,
            rear_bore,
        } => {
            let spec = WizardSpec {
                length,
                max_diameter: diameter,
                tungsten_percent: tungsten,
                shape_type: shape.into(),
                front_taper_length: front_taper,
                rear_taper_length: rear_taper,
                hole_depth_front: front_bore,
                hole_depth_rear: rear_bore,
            };
            new_design(&output, &spec, config)?;
        }
        Commands::Set { design, dims } => {
            set_dimensions(&design, config, &dims.edits())?;
        }
        Commands::Info { design, json } => {
            show_info(&design, config, json)?;
        }
        Commands::Profile { design } => {
            print_profile(&design, config)?;
        }
        Commands::Export { design, output } => {
            export_stl(&design, &output, config)?;
        }
        Commands::AddCut {
            design,
            kind,
            width,
            pitch,
            depth,
            count,
        } => {
            add_cut(&design, config, kind, width, pitch, depth, count)?;
        }
        Commands::EditCut {
            design,
            id,
            kind,
            start,
            end,
            pitch,
            depth,
            count,
        } => {
            let update = CutUpdate {
                kind,
                start_z: start,
                end_z: end,
                pitch,
                depth,
                item_count: count,
            };
            edit_existing_cut(&design, config, &id, &update)?;
        }
        Commands::RemoveCut { design, id } => {
            remove_cut(&design, config, &id)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<KernelConfig> {
    let Some(path) = path else {
        return Ok(KernelConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = KernelConfig::from_toml(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn load_design(path: &Path) -> Result<BarrelDesign> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read design {}", path.display()))?;
    BarrelDesign::from_json(&json).with_context(|| format!("invalid design {}", path.display()))
}

fn load_barrel(path: &Path, config: KernelConfig) -> Result<Barrel> {
    let design = load_design(path)?;
    Barrel::new(design, config).with_context(|| format!("invalid design {}", path.display()))
}

fn save_design(path: &Path, design: &BarrelDesign) -> Result<()> {
    fs::write(path, design.to_json()?)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn new_design(output: &Path, spec: &WizardSpec, config: KernelConfig) -> Result<()> {
    let design = BarrelDesign::wizard(spec);
    let barrel = Barrel::new(design, config)?;
    save_design(output, barrel.design())?;

    let props = barrel.mass_properties()?;
    println!("Created {}", output.display());
    println!("  Weight: {:.2} g", props.weight);
    Ok(())
}

fn show_info(path: &Path, config: KernelConfig, json: bool) -> Result<()> {
    let barrel = load_barrel(path, config)?;
    let props = barrel.mass_properties()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&props)?);
        return Ok(());
    }

    let d = barrel.design();
    println!("barrelcad design: {}", path.display());
    println!("  Length: {} mm", d.length);
    println!("  Max diameter: {} mm", d.max_diameter);
    println!(
        "  Tapers: front {} mm, rear {} mm",
        d.front_taper_length, d.rear_taper_length
    );
    println!(
        "  Bores: front {} mm, rear {} mm",
        d.hole_depth_front, d.hole_depth_rear
    );
    println!("  Density: {} g/cm³", d.material_density);

    if !d.cuts.is_empty() {
        println!("\nCuts:");
        for cut in &d.cuts {
            let p = &cut.properties;
            print!(
                "  {}: {} {}..{} mm (pitch {}, depth {}",
                cut.id,
                cut.unknown_tag.as_deref().unwrap_or(cut.kind.as_str()),
                cut.start_z,
                cut.end_z,
                p.pitch,
                p.depth
            );
            if cut.kind.is_vertical() {
                print!(", {} grooves", p.item_count());
            }
            println!(")");
        }
    }

    println!("\nPhysical properties:");
    println!("  Volume: {:.3} cm³", props.volume);
    println!("  Weight: {:.2} g", props.weight);
    println!("  Center of gravity: {:.2} mm from front", props.center_of_gravity);
    Ok(())
}

fn print_profile(path: &Path, config: KernelConfig) -> Result<()> {
    let barrel = load_barrel(path, config)?;
    println!("z,radius");
    for p in barrel.profile()? {
        println!("{:.4},{:.4}", p.z, p.radius);
    }
    Ok(())
}

fn export_stl(path: &Path, output: &Path, config: KernelConfig) -> Result<()> {
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case("stl") {
        bail!("Unknown output format: {}", ext);
    }

    let barrel = load_barrel(path, config)?;
    let mesh = barrel.mesh()?;
    fs::write(output, export::stl_bytes(&mesh))
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Exported {} triangles to {}",
        mesh.num_triangles(),
        output.display()
    );
    Ok(())
}

fn add_cut(
    path: &Path,
    config: KernelConfig,
    kind: CutKind,
    width: f64,
    pitch: Option<f64>,
    depth: Option<f64>,
    count: Option<u32>,
) -> Result<()> {
    let mut design = load_design(path)?;
    let Some((start, end)) = find_free_slot(design.length, &design.cuts, kind, width) else {
        bail!("no free {} mm slot for a {} cut", width, kind);
    };

    let id = design.next_cut_id(kind);
    let mut cut = CutZone::new(id.clone(), kind, start, end)
        .with_pattern(pitch.unwrap_or(DEFAULT_PITCH), depth.unwrap_or(DEFAULT_DEPTH));
    if let Some(count) = count {
        cut = cut.with_item_count(count);
    }
    design.add_cut(cut);

    let barrel = Barrel::new(design, config)?;
    save_design(path, barrel.design())?;
    println!("Added {} at {:.1}..{:.1} mm", id, start, end);
    Ok(())
}

fn set_dimensions(path: &Path, config: KernelConfig, edits: &[(Dimension, f64)]) -> Result<()> {
    if edits.is_empty() {
        bail!("nothing to set");
    }
    let mut design = load_design(path)?;
    for &(dim, value) in edits {
        design.set_dimension(dim, value);
    }

    let barrel = Barrel::new(design, config)?;
    save_design(path, barrel.design())?;
    let props = barrel.mass_properties()?;
    println!("Updated {}", path.display());
    println!("  Weight: {:.2} g", props.weight);
    Ok(())
}

fn edit_existing_cut(
    path: &Path,
    config: KernelConfig,
    id: &str,
    update: &CutUpdate,
) -> Result<()> {
    if update.is_empty() {
        bail!("nothing to change for cut '{}'", id);
    }
    let mut design = load_design(path)?;
    let (start, end) = {
        let cut = edit_cut(&mut design, id, update)?;
        (cut.start_z, cut.end_z)
    };

    let barrel = Barrel::new(design, config)?;
    save_design(path, barrel.design())?;
    println!("Edited {} at {:.1}..{:.1} mm", id, start, end);
    Ok(())
}

fn remove_cut(path: &Path, config: KernelConfig, id: &str) -> Result<()> {
    let mut design = load_design(path)?;
    if design.remove_cut(id).is_none() {
        bail!("no cut with id '{}'", id);
    }
    let barrel = Barrel::new(design, config)?;
    save_design(path, barrel.design())?;
    println!("Removed {}", id);
    Ok(())
}
