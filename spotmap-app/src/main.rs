use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use spotmap::{
    animation::ViewTransition,
    geolocation::source::{FixedPositionSource, Position},
    layers::marker::Marker,
    search::Suggestion,
    ui::detail::spot_id_from_query,
    DetailPage, LatLng, LocateOutcome, MapPage, MapPageConfig, PageSurface, PanelContent,
    SpotLoader,
};
use std::path::{Path, PathBuf};

mod pages;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Spot map companion: inspect, search, locate and render detail pages",
    long_about = None
)]
struct Cli {
    /// Location of spots.json, a URL or a file path. Defaults to the config's data_url.
    #[arg(long, global = true)]
    data: Option<String>,

    /// JSON page configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Counts fetched and mapped spots
    Stats,
    /// Suggestions for a keyword, or the filtered map with --apply
    Search {
        keyword: String,
        #[arg(long)]
        apply: bool,
    },
    /// Simulates a locate-me click with a fixed position
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Shows a spot's detail page, by id or by detail page URL
    Detail { spot: String },
    /// Writes one static detail page per spot under <OUT_DIR>/spot/
    Render { out_dir: PathBuf },
}

/// Prints what a browser page would show
struct ConsoleSurface;

impl PageSurface for ConsoleSurface {
    fn alert(&mut self, message: &str) {
        eprintln!("[alert] {message}");
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        for suggestion in suggestions {
            println!("  {}", suggestion.display_name);
        }
    }

    fn render_panel(&mut self, panel: &PanelContent) {
        print_panel(panel);
    }

    fn view_changed(&mut self, transition: &ViewTransition) {
        println!(
            "view: {} @ z{} ({:?})",
            transition.to_center, transition.to_zoom, transition.duration
        );
    }

    fn markers_changed(&mut self, visible: usize) {
        println!("visible markers: {visible}");
    }

    fn open_popup(&mut self, marker: &Marker) {
        if let Some(popup) = marker.popup() {
            println!("popup: {}", popup.title);
        }
    }
}

fn print_panel(panel: &PanelContent) {
    println!("== {} ==", panel.title);
    let fields = [
        ("category", &panel.category),
        ("area", &panel.area),
        ("description", &panel.description),
        ("image", &panel.image),
        ("url", &panel.external_url),
        ("route", &panel.route_url),
        ("detail", &panel.detail_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{label:>12}: {value}");
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MapPageConfig> {
    match path {
        Some(path) => MapPageConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(MapPageConfig::default()),
    }
}

async fn open_page(
    config: MapPageConfig,
    loader: &SpotLoader,
) -> anyhow::Result<MapPage<ConsoleSurface>> {
    let mut page = MapPage::new(config, ConsoleSurface)?;
    page.load(loader)
        .await
        .with_context(|| format!("loading spots from {}", loader.location()))?;
    Ok(page)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let loader = SpotLoader::from_location(cli.data.as_deref().unwrap_or(&config.data_url));

    match cli.command {
        Command::Stats => {
            let page = open_page(config, &loader).await?;
            println!("spots:  {}", page.spot_count());
            println!("mapped: {}", page.mapped_count());
            if let Some(layer) = page.base_layer() {
                println!("tiles:  {}", layer.attribution());
            }
        }
        Command::Search { keyword, apply } => {
            let mut page = open_page(config, &loader).await?;
            if apply {
                let result = page.apply_search(&keyword);
                if result.first_match.is_none() {
                    println!("no match for {keyword:?}");
                }
                for handle in &result.visible {
                    if let Some(entry) = page.registry().get(*handle) {
                        println!("  {} ({})", entry.display_name, entry.key);
                    }
                }
            } else {
                println!("suggestions for {keyword:?}:");
                if page.search_input(&keyword).is_empty() {
                    println!("  (none)");
                }
            }
        }
        Command::Locate { lat, lng } => {
            let coords = LatLng::new(lat, lng);
            if !coords.is_valid() {
                bail!("invalid coordinates {lat},{lng}");
            }

            let mut page = MapPage::new(config, ConsoleSurface)?;
            let source = FixedPositionSource::new(Position::new(coords));
            match page.locate(&source).await {
                LocateOutcome::Located { attempts, .. } => {
                    log::info!("located after {} request(s)", attempts);
                }
                outcome => bail!("locate failed: {outcome:?}"),
            }
        }
        Command::Detail { spot } => {
            let spot_id = spot_id_from_query(&spot).unwrap_or(spot);
            match DetailPage::load(&loader, Some(&spot_id)).await {
                Ok(page) => {
                    println!("{}", page.document_title);
                    print_panel(&page.panel);
                }
                Err(err) => {
                    log::error!("detail page for {:?}: {}", spot_id, err);
                    bail!(err.user_message());
                }
            }
        }
        Command::Render { out_dir } => {
            let store = loader
                .load()
                .await
                .with_context(|| format!("loading spots from {}", loader.location()))?;

            let spot_dir = out_dir.join("spot");
            tokio::fs::create_dir_all(&spot_dir)
                .await
                .with_context(|| format!("creating {}", spot_dir.display()))?;

            let rendered = pages::render_all(&store);
            for (path, html) in &rendered {
                let target = out_dir.join(path);
                tokio::fs::write(&target, html)
                    .await
                    .with_context(|| format!("writing {}", target.display()))?;
            }
            println!("{} pages written to {}", rendered.len(), spot_dir.display());
        }
    }

    Ok(())
}
