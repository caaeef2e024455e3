use std::num::NonZeroUsize;

use anyhow::{Context as _, bail};
use spatialsplit::{
    Clipper, PrimInfo, PrimRef, SplitSettings, TriangleMesh, WorkerCount, find_spatial_split,
};

struct Args {
    path: String,
    bins: usize,
    settings: SplitSettings,
    verbose: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut path = None;
    let mut bins = 32;
    let mut settings = SplitSettings::default();
    let mut verbose = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().with_context(|| format!("Missing value for {name}"));
        match arg.as_str() {
            "--bins" => bins = value("--bins")?.parse()?,
            "--blocks-shift" => settings.blocks_shift = value("--blocks-shift")?.parse()?,
            "--workers" => {
                settings.worker_count =
                    WorkerCount::Manual(value("--workers")?.parse::<NonZeroUsize>()?)
            }
            "--verbose" => verbose = true,
            other if other.starts_with("--") => bail!("Unknown option {other}"),
            other if path.is_none() => path = Some(other.to_owned()),
            other => bail!("Unexpected argument {other}"),
        }
    }

    let Some(path) = path else {
        bail!(
            "Usage: spatialsplit-cli <file.obj> [--bins 16|32|64] [--blocks-shift N] [--workers N] [--verbose]"
        );
    };

    Ok(Args {
        path,
        bins,
        settings,
        verbose,
    })
}

fn report<C: Clipper + Sync, const BINS: usize>(
    clipper: &C,
    prims: &[PrimRef],
    settings: &SplitSettings,
) {
    match find_spatial_split::<_, BINS>(clipper, prims, settings) {
        Some(split) => println!("{split}, plane at {}", split.plane_position()),
        None => println!("No spatial split"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    let fmt_subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(fmt_subscriber)?;

    let mesh = TriangleMesh::with_obj(&args.path)
        .with_context(|| format!("Loading {}", args.path))?;
    let prims = mesh.prim_refs();

    let info = PrimInfo::from_prims(&prims);
    println!(
        "{} triangles, {} vertices, bounds {:?} .. {:?}",
        mesh.triangle_count(),
        mesh.vertex_count(),
        info.geometry_bounds.min,
        info.geometry_bounds.max
    );

    match args.bins {
        16 => report::<_, 16>(&mesh, &prims, &args.settings),
        32 => report::<_, 32>(&mesh, &prims, &args.settings),
        64 => report::<_, 64>(&mesh, &prims, &args.settings),
        other => bail!("Unsupported bin count {other}, use 16, 32 or 64"),
    }

    Ok(())
}
