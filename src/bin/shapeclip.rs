use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "shapeclip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clip an image to a shape and write a PNG.
    Apply(ApplyArgs),
    /// Print the cache identity of a shape spec.
    Key(KeyArgs),
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Shape spec JSON.
    #[arg(long)]
    spec: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Target width; defaults to the source width.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Target height; defaults to the source height.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Directory holding `<id>.png` mask stencils and `<id>.svg` paths.
    /// Defaults to the spec file's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Shape spec JSON.
    #[arg(long)]
    spec: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Key(args) => cmd_key(args),
    }
}

fn read_transform(path: &Path) -> anyhow::Result<shapeclip::ShapeTransform> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read shape spec '{}'", path.display()))?;
    let spec = shapeclip::ShapeSpec::from_json(&json)?;
    Ok(shapeclip::ShapeTransform::new(spec)?)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let transform = read_transform(&args.spec)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input image '{}'", args.in_path.display()))?;
    let source = shapeclip::decode_image(&bytes)?;

    let target = match (args.width, args.height) {
        (Some(w), Some(h)) => shapeclip::TargetSize::exact(w, h),
        _ => shapeclip::TargetSize::Original,
    };

    let assets_root = match args.assets {
        Some(dir) => dir,
        None => args
            .spec
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let resources = shapeclip::DirResources::new(assets_root);
    let mut pool = shapeclip::BoundedPool::new(shapeclip::BoundedPoolOpts::from_env());

    let out = transform.apply(&source, target, &mut pool, &resources)?;
    let rgba = shapeclip::to_rgba_image(&out);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    rgba.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, key {})",
        args.out.display(),
        rgba.width(),
        rgba.height(),
        transform.identity().digest().to_hex()
    );
    Ok(())
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let transform = read_transform(&args.spec)?;
    let identity = transform.identity();
    println!("{identity}");
    println!("xxh3-128 {}", identity.digest().to_hex());
    println!("sha256 {}", sha256_hex(identity.as_bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
