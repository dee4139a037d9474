use seastar::render::{LayoutStrategy, RenderOptions};
use seastar_render::scene::build_scene;
use seastar_render::svg::render_scene_svg;
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Envelope(seastar::Error),
    Render(seastar_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Envelope(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<seastar::Error> for CliError {
    fn from(value: seastar::Error) -> Self {
        Self::Envelope(value)
    }
}

impl From<seastar_render::Error> for CliError {
    fn from(value: seastar_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Build,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum StrategyArg {
    Radial,
    #[default]
    Relaxed,
}

impl FromStr for StrategyArg {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radial" => Ok(Self::Radial),
            "relaxed" => Ok(Self::Relaxed),
            _ => Err(()),
        }
    }
}

impl From<StrategyArg> for LayoutStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Radial => LayoutStrategy::Radial,
            StrategyArg::Relaxed => LayoutStrategy::RadialRelaxed,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    width: f64,
    height: f64,
    strategy: StrategyArg,
    record_id: Option<String>,
    record_type: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "seastar-cli\n\
\n\
USAGE:\n\
  seastar-cli [build] [--pretty] [--record-id <id>] [--record-type <type>] [<path>|-]\n\
  seastar-cli layout [--pretty] [--width <w>] [--height <h>] [--strategy radial|relaxed] [--record-id <id>] [--record-type <type>] [<path>|-]\n\
  seastar-cli render [--width <w>] [--height <h>] [--strategy radial|relaxed] [--record-id <id>] [--record-type <type>] [--id <diagram-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the envelope JSON is read from stdin.\n\
  - build prints the {nodes, links} graph model as JSON.\n\
  - layout prints the positioned scene (shell boxes, edges, badges) as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - An envelope that fails validation builds an empty graph, not an error.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 800.0,
        height: 600.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "build" => args.command = Command::Build,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--strategy" => {
                let Some(s) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.strategy = s
                    .parse::<StrategyArg>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--record-id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.record_id = Some(id.clone());
            }
            "--record-type" => {
                let Some(t) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.record_type = Some(t.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn render_options(args: &Args) -> RenderOptions {
    let mut options = RenderOptions::default()
        .with_size(args.width, args.height)
        .with_strategy(args.strategy.into());
    options.diagram_id = args.diagram_id.clone();
    options
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let envelope = seastar::parse_envelope(&text)?;
    let overrides = seastar::BuildOverrides {
        record_id: args.record_id.clone(),
        record_type: args.record_type.clone(),
    };
    let graph = seastar::build_graph(&envelope, &overrides);

    match args.command {
        Command::Build => {
            write_json(&graph, args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let scene = build_scene(&graph, &render_options(&args))?;
            write_json(&scene, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let options = render_options(&args);
            let scene = build_scene(&graph, &options)?;
            let svg = render_scene_svg(&scene, &options)?;
            write_text(&svg, args.out.as_deref())?;
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
