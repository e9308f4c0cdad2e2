use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use bannerforge::{
    BannerConfig, BatchGenerator, CancelToken, FontBook, FsAssetSource, Layout, Recipient,
    RecipientRecord, Renderer, active_recipients, describe_layout, init_logging, write_outputs,
    write_report,
};

#[derive(Parser, Debug)]
#[command(name = "bannerforge", version)]
struct Cli {
    /// Config JSON (defaults to $XDG_CONFIG_HOME/bannerforge/config.json when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one banner per recipient into a directory.
    Generate(GenerateArgs),
    /// Print the layout as numbered personalization rules.
    Rules(RulesArgs),
    /// Render a single recipient's banner as a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Layout JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Base banner image.
    #[arg(long)]
    base: PathBuf,

    /// Recipients JSON (array of records).
    #[arg(long)]
    recipients: PathBuf,

    /// Directory logo references resolve against (defaults to the recipients file's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Banner name used in output file names.
    #[arg(long, default_value = "banner")]
    name: String,

    /// Override worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Also render suspended recipients.
    #[arg(long, default_value_t = false)]
    include_suspended: bool,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    /// Layout JSON.
    #[arg(long)]
    layout: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Layout JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Base banner image.
    #[arg(long)]
    base: PathBuf,

    /// Recipients JSON (array of records).
    #[arg(long)]
    recipients: PathBuf,

    /// 0-based recipient index.
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Directory logo references resolve against (defaults to the recipients file's directory).
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BannerConfig::load(cli.config.as_deref())?;
    config.apply_env()?;
    init_logging(&config.logging);

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args, config),
        Command::Rules(args) => cmd_rules(args),
        Command::Preview(args) => cmd_preview(args, config),
    }
}

fn cmd_generate(args: GenerateArgs, mut config: BannerConfig) -> anyhow::Result<()> {
    if let Some(n) = args.threads {
        config.batch.threads = n;
    }
    let layout = read_layout(&args.layout)?;
    let base_bytes =
        std::fs::read(&args.base).with_context(|| format!("read base '{}'", args.base.display()))?;
    let recipients = read_recipients(&args.recipients, args.include_suspended)?;
    let assets = FsAssetSource::new(assets_root(args.assets_root, &args.recipients));

    let fonts = Arc::new(FontBook::new(&config.fonts));
    let generator = BatchGenerator::new(fonts, config.render.clone(), &config.batch)?;
    let report = generator.generate(
        &layout,
        &base_bytes,
        &recipients,
        &assets,
        &CancelToken::new(),
    )?;

    let written = write_outputs(&args.out, &args.name, &report, &recipients)?;
    write_report(&args.out.join("report.json"), &report)?;

    eprintln!(
        "generated {} of {} banners ({} failed) in {}",
        written.len(),
        recipients.len(),
        report.failed(),
        args.out.display()
    );
    Ok(())
}

fn cmd_rules(args: RulesArgs) -> anyhow::Result<()> {
    let layout = read_layout(&args.layout)?;
    println!("{}", describe_layout(&layout));
    Ok(())
}

fn cmd_preview(args: PreviewArgs, config: BannerConfig) -> anyhow::Result<()> {
    let layout = read_layout(&args.layout)?;
    let base_bytes =
        std::fs::read(&args.base).with_context(|| format!("read base '{}'", args.base.display()))?;
    let recipients = read_recipients(&args.recipients, true)?;
    let recipient = recipients.get(args.index).with_context(|| {
        format!(
            "recipient index {} out of range ({} recipients)",
            args.index,
            recipients.len()
        )
    })?;
    let assets = FsAssetSource::new(assets_root(args.assets_root, &args.recipients));

    let mut renderer = Renderer::new(Arc::new(FontBook::new(&config.fonts)), config.render);
    let png = renderer.render_encoded(&layout, &base_bytes, recipient, &assets)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_layout(path: &Path) -> anyhow::Result<Layout> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read layout '{}'", path.display()))?;
    Ok(Layout::from_json_str(&text)?)
}

fn read_recipients(path: &Path, include_suspended: bool) -> anyhow::Result<Vec<Recipient>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read recipients '{}'", path.display()))?;
    let records: Vec<RecipientRecord> = serde_json::from_str(&text)
        .with_context(|| format!("parse recipients '{}'", path.display()))?;
    Ok(if include_suspended {
        records.into_iter().map(Recipient::from).collect()
    } else {
        active_recipients(records)
    })
}

fn assets_root(explicit: Option<PathBuf>, recipients: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| {
        recipients
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}
