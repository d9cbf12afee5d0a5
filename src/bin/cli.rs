// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! sectionkit CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sectionkit::cli::{parse_vector, PrimitiveKind, Reporter};
use sectionkit::geometry::{validate_mesh, Mesh, Plane};
use sectionkit::{io, SectionConfig, SectionKernel};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sectionkit")]
#[command(about = "Planar cross-sections of triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Section config file (defaults to ./section.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct MeshSource {
    /// Input STL file
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Built-in mesh to cut instead of a file
    #[arg(short, long, value_enum)]
    primitive: Option<PrimitiveKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut a mesh with one plane
    Section {
        #[command(flatten)]
        source: MeshSource,

        /// Plane normal as x,y,z
        #[arg(short, long, default_value = "0,0,1", allow_hyphen_values = true)]
        normal: String,

        /// Plane constant d in n·p + d = 0
        #[arg(short = 'd', long, default_value_t = 0.0, allow_hyphen_values = true)]
        constant: f64,

        /// Push the placed section along the normal
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,

        /// Compute the convex hull of each contour
        #[arg(long)]
        hull: bool,

        /// Fail on branching outlines
        #[arg(long)]
        strict: bool,

        /// Write the section as JSON to this file ("-" for stdout)
        #[arg(long, value_name = "FILE")]
        json: Option<String>,
    },

    /// Cut a mesh with evenly spaced parallel planes
    Sweep {
        #[command(flatten)]
        source: MeshSource,

        /// Plane normal as x,y,z
        #[arg(short, long, default_value = "0,0,1", allow_hyphen_values = true)]
        normal: String,

        /// First offset along the normal
        #[arg(long, allow_hyphen_values = true)]
        from: f64,

        /// Last offset along the normal
        #[arg(long, allow_hyphen_values = true)]
        to: f64,

        /// Number of planes
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },

    /// Write a built-in mesh to STL
    Generate {
        #[arg(value_enum)]
        primitive: PrimitiveKind,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Section {
            source,
            normal,
            constant,
            offset,
            hull,
            strict,
            json,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            config.strict_branching |= *strict;
            section_command(source, normal, *constant, *offset, *hull, json.as_deref(), config)
        }
        Commands::Sweep {
            source,
            normal,
            from,
            to,
            steps,
        } => {
            let config = load_config(cli.config.as_ref())?;
            sweep_command(source, normal, *from, *to, *steps, config)
        }
        Commands::Generate { primitive, output } => generate_command(*primitive, output),
        Commands::Version => {
            println!("sectionkit v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SectionConfig> {
    match path {
        Some(path) => {
            let mut config = SectionConfig::from_file(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok())?;
            Ok(config)
        }
        None => SectionConfig::load(),
    }
}

fn load_mesh(source: &MeshSource) -> Result<(String, Mesh)> {
    match (&source.input, source.primitive) {
        (Some(path), _) => Ok((path.display().to_string(), io::import_stl(path)?)),
        (None, Some(kind)) => Ok((kind.name().to_string(), kind.to_mesh())),
        (None, None) => anyhow::bail!("Either --input or --primitive is required"),
    }
}

fn section_command(
    source: &MeshSource,
    normal: &str,
    constant: f64,
    offset: f64,
    hull: bool,
    json: Option<&str>,
    config: SectionConfig,
) -> Result<()> {
    let (name, mesh) = load_mesh(source)?;
    let plane = Plane::new(parse_vector(normal)?, constant)?;
    let kernel = SectionKernel::with_config(mesh, config)?;

    let start = Instant::now();
    let section = kernel
        .section_with_offset(&plane, offset)
        .context("Sectioning failed")?;
    let duration = start.elapsed();
    let hull_precision = hull.then(|| kernel.hull_precision());

    match json {
        Some("-") => println!("{}", io::section_to_json(&section, hull_precision)?),
        Some(path) => {
            io::export_section_json(&section, path, hull_precision)?;
            Reporter::report_section(&name, &section, duration, hull_precision);
            Reporter::success(&format!("Wrote {}", path));
        }
        None => Reporter::report_section(&name, &section, duration, hull_precision),
    }

    if section.contours.iter().any(|c| !c.closed) {
        Reporter::report_warning("Section contains open contours");
    }
    Ok(())
}

fn sweep_command(
    source: &MeshSource,
    normal: &str,
    from: f64,
    to: f64,
    steps: usize,
    config: SectionConfig,
) -> Result<()> {
    let (name, mesh) = load_mesh(source)?;
    let kernel = SectionKernel::with_config(mesh, config)?;

    let start = Instant::now();
    let sections = kernel
        .sweep(parse_vector(normal)?, from, to, steps)
        .context("Sweep failed")?;
    let duration = start.elapsed();

    let offsets: Vec<f64> = sections.iter().map(|s| -s.plane.constant).collect();
    Reporter::report_sweep(&name, &offsets, &sections, duration);
    Ok(())
}

fn generate_command(primitive: PrimitiveKind, output: &Path) -> Result<()> {
    let mesh = primitive.to_mesh();
    let validation = validate_mesh(&mesh);

    io::export_stl(&mesh, output)?;
    Reporter::report_mesh(
        primitive.name(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        validation.is_closed,
    );
    Reporter::success(&format!("Wrote {}", output.display()));
    Ok(())
}
