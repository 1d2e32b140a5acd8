use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ratescene::{
    ChartConfig, Dataset, PageLinks, RasterOpts, RenderedScene, SceneController, SceneKind,
    SceneRegistry, Year,
    render::raster,
    session::{self, Command as SessionCommand, Outcome},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ratescene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one scene as SVG, HTML or PNG.
    Render(RenderArgs),
    /// Render every scene in order into a directory, with linked HTML navigation.
    Deck(DeckArgs),
    /// Interactive session: read commands from stdin and rewrite an HTML page after each one.
    Present(PresentArgs),
    /// Print the scene registry as JSON.
    Scenes,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Input CSV with a Year column and one numeric column per series.
    #[arg(long, default_value = "data/dataset.csv")]
    data: PathBuf,

    /// Optional chart config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RasterArgs {
    /// PNG pixel density multiplier.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Extra directory of fonts for PNG text.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

impl RasterArgs {
    fn opts(&self) -> RasterOpts {
        RasterOpts {
            scale: self.scale,
            fonts_dir: self.fonts_dir.clone(),
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Scene id: overall, comparison or interactive.
    #[arg(long, default_value = "overall", value_parser = parse_scene)]
    scene: SceneKind,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Interactive scene: year slider value.
    #[arg(long)]
    year: Option<i32>,

    /// Interactive scene: uncheck this series (repeatable).
    #[arg(long)]
    hide: Vec<String>,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Parser, Debug)]
struct DeckArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    #[command(flatten)]
    raster: RasterArgs,
}

#[derive(Parser, Debug)]
struct PresentArgs {
    #[command(flatten)]
    data: DataArgs,

    /// HTML page rewritten after every command.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Html,
    Png,
}

impl Format {
    fn ext(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
            Self::Png => "png",
        }
    }

    fn infer(path: &Path) -> anyhow::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("html") | Some("htm") => Ok(Self::Html),
            Some("png") => Ok(Self::Png),
            _ => anyhow::bail!(
                "cannot infer output format from '{}'; pass --format",
                path.display()
            ),
        }
    }
}

fn parse_scene(s: &str) -> Result<SceneKind, String> {
    s.parse().map_err(|e: ratescene::SceneError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ratescene=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Deck(args) => cmd_deck(args),
        Command::Present(args) => cmd_present(args),
        Command::Scenes => cmd_scenes(),
    }
}

fn load_controller(args: &DataArgs) -> anyhow::Result<SceneController> {
    let config = match &args.config {
        Some(path) => ChartConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ChartConfig::default(),
    };
    let dataset = Dataset::from_path(&args.data)
        .with_context(|| format!("load dataset '{}'", args.data.display()))?;
    Ok(SceneController::new(
        SceneRegistry::standard(),
        dataset,
        config,
    )?)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_scene(
    shown: &RenderedScene,
    out: &Path,
    format: Format,
    links: &PageLinks,
    raster_opts: &RasterOpts,
) -> anyhow::Result<()> {
    ensure_parent(out)?;
    match format {
        Format::Svg => std::fs::write(out, shown.to_svg()?)
            .with_context(|| format!("write svg '{}'", out.display()))?,
        Format::Html => std::fs::write(out, shown.to_html(links)?)
            .with_context(|| format!("write html '{}'", out.display()))?,
        Format::Png => raster::write_png(&shown.to_svg()?, out, raster_opts)?,
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let format = match args.format {
        Some(f) => f,
        None => Format::infer(&args.out)?,
    };
    let mut ctl = load_controller(&args.data)?;
    let mut shown = ctl.jump_to(args.scene)?;

    if args.scene == SceneKind::Interactive {
        for key in &args.hide {
            shown = ctl.set_series(key, false)?;
        }
        if let Some(y) = args.year {
            shown = ctl.set_year_bound(Year(y))?;
        }
    } else if args.year.is_some() || !args.hide.is_empty() {
        anyhow::bail!("--year and --hide only apply to the interactive scene");
    }

    write_scene(
        &shown,
        &args.out,
        format,
        &PageLinks::default(),
        &args.raster.opts(),
    )?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn deck_file_name(index: usize, kind: SceneKind, format: Format) -> String {
    format!("{:02}-{}.{}", index + 1, kind, format.ext())
}

fn cmd_deck(args: DeckArgs) -> anyhow::Result<()> {
    let mut ctl = load_controller(&args.data)?;
    let kinds: Vec<SceneKind> = ctl.registry().iter().map(|s| s.kind).collect();
    let name = |i: usize| deck_file_name(i, kinds[i], args.format);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut shown = ctl.replay()?;
    for i in 0..kinds.len() {
        if i > 0 {
            shown = ctl.advance()?;
        }
        let nav = shown.navigation;
        let links = PageLinks {
            previous: nav.previous.then(|| name(i - 1)),
            next: nav.next.then(|| name(i + 1)),
            replay: nav.replay.then(|| name(0)),
        };
        let out = args.out_dir.join(name(i));
        write_scene(&shown, &out, args.format, &links, &args.raster.opts())?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_present(args: PresentArgs) -> anyhow::Result<()> {
    let mut ctl = load_controller(&args.data)?;
    let opts = RasterOpts::default();
    let links = PageLinks::default();

    let first = ctl.render()?;
    write_scene(&first, &args.out, Format::Html, &links, &opts)?;
    announce(&first, &args.out);
    eprintln!("{}", session::HELP);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("> ");
        std::io::stderr().flush().ok();
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<SessionCommand>()
            .and_then(|cmd| session::execute(&mut ctl, &cmd));
        match outcome {
            Ok(Outcome::Rendered(shown)) => {
                write_scene(&shown, &args.out, Format::Html, &links, &opts)?;
                announce(&shown, &args.out);
            }
            Ok(Outcome::Unchanged) => eprintln!("already at the first scene"),
            Ok(Outcome::Help) => eprintln!("{}", session::HELP),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

fn announce(shown: &RenderedScene, out: &Path) {
    let mut line = format!(
        "scene {} ({}): {}",
        shown.index + 1,
        shown.scene.kind,
        shown.scene.title
    );
    if let Some(c) = &shown.controls {
        let on: Vec<_> = c
            .checkboxes
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.key.as_str())
            .collect();
        line.push_str(&format!(
            " [series: {}; through {}]",
            on.join(", "),
            c.slider.value
        ));
    }
    eprintln!("{line} -> {}", out.display());
}

fn cmd_scenes() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&SceneRegistry::standard())
        .context("serialize scene registry")?;
    println!("{json}");
    Ok(())
}
