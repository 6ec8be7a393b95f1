use anyhow::Context as _;
use clap::Parser;
use goalbook::{GoalProvider, JsonFileProvider};
use relm4::prelude::*;
use ringclock::config::{self, DesktopLayer};
use ringclock::gui::app::AppModel;
use ringclock::gui::clock::{self, Animator, RenderState, RingSet, Viewport, YearWindow};
use ringclock::gui::theme::ThemeColors;
use ringclock::sys::navigate::{self, Navigator};
use ringclock::sys::runtime;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Goals file to read (overrides the config file)
    #[arg(short = 'g', long)]
    goals_file: Option<PathBuf>,

    /// Where the window lives: normal, background or bottom
    #[arg(short = 'l', long)]
    layer: Option<DesktopLayer>,

    /// Render a single frame to a PNG file and exit
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Snapshot size in pixels
    #[arg(long, default_value_t = 900)]
    size: i32,

    /// Write a commented config file if none exists and print its path
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let goals_path = args
        .goals_file
        .or(config.goals_file.clone())
        .unwrap_or_else(JsonFileProvider::default_path);
    let board = navigate::locate_board(&config.board_path, &goals_path);
    let provider = Arc::new(JsonFileProvider::new(goals_path.clone()));

    let state = RenderState::new(RingSet::new(YearWindow::new(config.first_year)), board);

    if let Some(path) = args.snapshot {
        return snapshot(state, provider.as_ref(), &path, args.size);
    }

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, provider);

    let layer = args.layer.unwrap_or(config.layer);
    let navigator = Navigator::new(config.open_command);

    let app = RelmApp::new("org.ringclock.RingClock").with_args(Vec::new());
    app.run::<AppModel>((state, navigator, layer, rx, goals_path));
    Ok(())
}

fn snapshot(
    mut state: RenderState,
    provider: &dyn GoalProvider,
    path: &Path,
    size: i32,
) -> anyhow::Result<()> {
    let size = size.max(1);
    state.resize(Viewport::new(f64::from(size), f64::from(size)));
    state.set_goals(provider.read_goals());
    Animator::default().step(&mut state);

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size, size)?;
    {
        let cr = cairo::Context::new(&surface)?;
        clock::draw(&cr, &state, &ThemeColors::pastel())?;
    }

    let mut file = fs_err::File::create(path)?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Snapshot written to {}", path.display());
    Ok(())
}
