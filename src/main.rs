use std::collections::VecDeque;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use farmrpg_tracker::sidebar::render::render_html;
use farmrpg_tracker::{Outbound, PanelModel, Tracker, TrackerConfig, TrackerState};

fn print_usage() {
    println!("farmrpg-tracker [options] [capture.jsonl ...]");
    println!("Replays captured page loads and clicks, one JSON object per line:");
    println!("  {{\"url\": \"https://farmrpg.com/...\", \"content\": \"<html>\"}}");
    println!("  {{\"click\": \"item:Wood\"}}");
    println!("Reads stdin when no capture file is given.");
    println!("options:");
    println!("  --config <path>   tracker config (JSON)");
    println!("  --world <path>    locations and pets (JSON)");
    println!("  --catalog <path>  item catalog replacing the bundled one (JSON)");
    println!("  --json            print panels as JSON instead of HTML");
    #[cfg(feature = "http")]
    println!("  --cookie <value>  session cookie used to fetch requested pages");
}

#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    world: Option<String>,
    catalog: Option<String>,
    cookie: Option<String>,
    json: bool,
    captures: Vec<String>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |label: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("missing value for {}", label))
        };
        match arg.as_str() {
            "--config" => options.config = Some(value("--config")?),
            "--world" => options.world = Some(value("--world")?),
            "--catalog" => options.catalog = Some(value("--catalog")?),
            "--cookie" => options.cookie = Some(value("--cookie")?),
            "--json" => options.json = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            path => options.captures.push(path.to_string()),
        }
    }
    Ok(options)
}

/// One line of a capture file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaptureEvent {
    Page { url: String, content: String },
    Click { click: String },
}

struct Session {
    tracker: Tracker,
    state: TrackerState,
    json: bool,
    last_panel: Option<PanelModel>,
    #[cfg(feature = "http")]
    fetcher: Option<farmrpg_tracker::net::PageFetcher>,
}

impl Session {
    fn handle(&mut self, event: CaptureEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let outcome = match &event {
                CaptureEvent::Page { url, content } => {
                    self.tracker.handle_page(&mut self.state, url, content)
                }
                CaptureEvent::Click { click } => self.tracker.handle_click(&mut self.state, click),
            };
            if let Err(err) = outcome {
                log::error!("{:?}: {}", event_label(&event), err);
            }
            for message in self.state.drain_outbox() {
                if let Some(next) = self.deliver(message) {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Act on one outbound message. A fetched page comes back as a new event.
    fn deliver(&mut self, message: Outbound) -> Option<CaptureEvent> {
        match message {
            Outbound::UpdatePanel(panel) => {
                if self.last_panel.as_ref() != Some(&panel) {
                    self.print_panel(&panel);
                    self.last_panel = Some(panel);
                }
                None
            }
            Outbound::ReloadView { url } => {
                println!("reload: {}", url);
                None
            }
            Outbound::FetchPage { url } => self.fetch(url),
        }
    }

    #[cfg(feature = "http")]
    fn fetch(&self, url: String) -> Option<CaptureEvent> {
        let Some(fetcher) = &self.fetcher else {
            log::warn!("Fetch of {} requested but no --cookie given", url);
            return None;
        };
        match fetcher.fetch(&url) {
            Ok(page) => Some(CaptureEvent::Page {
                url: page.url,
                content: page.html,
            }),
            Err(err) => {
                log::error!("Fetch failed: {}", err);
                None
            }
        }
    }

    #[cfg(not(feature = "http"))]
    fn fetch(&self, url: String) -> Option<CaptureEvent> {
        log::warn!("Fetch of {} requested but http support is disabled", url);
        None
    }

    fn print_panel(&self, panel: &PanelModel) {
        if self.json {
            match serde_json::to_string(panel) {
                Ok(line) => println!("{}", line),
                Err(err) => log::error!("Panel serialization failed: {}", err),
            }
        } else {
            print!("{}", render_html(panel));
        }
    }
}

fn event_label(event: &CaptureEvent) -> &str {
    match event {
        CaptureEvent::Page { url, .. } => url,
        CaptureEvent::Click { click } => click,
    }
}

fn replay<R: BufRead>(session: &mut Session, reader: R, source: &str) -> Result<(), String> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| format!("{}: {}", source, err))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CaptureEvent>(&line) {
            Ok(event) => session.handle(event),
            Err(err) => log::warn!("{}:{}: skipped line: {}", source, idx + 1, err),
        }
    }
    Ok(())
}

fn run(options: Options) -> Result<(), String> {
    let mut config = match &options.config {
        Some(path) => TrackerConfig::load(Path::new(path)).map_err(|err| format!("{}: {}", path, err))?,
        None => TrackerConfig::default(),
    };
    if let Some(world) = &options.world {
        config = config.with_world_path(world);
    }
    if let Some(catalog) = &options.catalog {
        config = config.with_catalog_path(catalog);
    }

    let tracker = Tracker::new(&config).map_err(|err| err.to_string())?;
    let state = Tracker::load_state(&config).map_err(|err| err.to_string())?;

    #[cfg(feature = "http")]
    let fetcher = match options.cookie.clone() {
        Some(cookie) => Some(
            farmrpg_tracker::net::PageFetcher::new(Some(cookie)).map_err(|err| err.to_string())?,
        ),
        None => None,
    };
    if cfg!(not(feature = "http")) && options.cookie.is_some() {
        log::warn!("--cookie ignored: built without http support");
    }

    let mut session = Session {
        tracker,
        state,
        json: options.json,
        last_panel: None,
        #[cfg(feature = "http")]
        fetcher,
    };

    if options.captures.is_empty() {
        let stdin = io::stdin();
        replay(&mut session, stdin.lock(), "<stdin>")?;
    } else {
        for path in &options.captures {
            let file = File::open(path).map_err(|err| format!("{}: {}", path, err))?;
            replay(&mut session, BufReader::new(file), path)?;
        }
    }

    log::info!(
        "Replay done: {} items tracked, max {}, view {}",
        session.state.inventory.len(),
        session.state.inventory.max(),
        session.state.view()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return;
    }

    let result = parse_args(&args).and_then(run);
    if let Err(err) = result {
        eprintln!("error: {err}");
        print_usage();
        std::process::exit(1);
    }
}
