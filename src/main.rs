use docopt::Docopt;
use log::{info, warn, LevelFilter, Log, Metadata, Record};
use serde_derive::Deserialize;
use smallvec::smallvec;
use mazegen::{
    grid_displays::{GridDisplay, LayeredDisplay, MazeDisplay, PathDisplay,
                    StartEndPointsDisplay},
    maze::MazeGenerator,
    units::{Height, Width},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--show-path] [--mark-start-end] [--text-out=<path>] [--save-edges=<path>] [--log-level=<level>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 10].
    --grid-height=<h>      The grid height in a w*h grid [default: 10].
    --seed=<s>             Seed for the random number generator, the same seed always carves the same maze.
    --show-path            Show the route from the top left entrance to the bottom right exit.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) on the entrance and exit cells, over any path.
    --text-out=<path>      Output file path for the textual rendering of the maze instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --log-level=<level>    Log messages at this level and above to stderr: error, warn, info, debug or trace [default: warn].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_save_edges: String,
    flag_log_level: String,
}

mod errors {
    use error_chain::error_chain;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level_name: &str) -> Result<()> {
    let level = level_name.parse::<LevelFilter>()
        .map_err(|_| format!("Unknown log level '{}'", level_name))?;
    log::set_logger(&LOGGER).map_err(|_| "A logger is already installed")?;
    log::set_max_level(level);
    info!("logging at {}", level);
    Ok(())
}

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    init_logging(&args.flag_log_level)?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut maze = match args.flag_seed {
        Some(seed) => MazeGenerator::from_seed(Width(width), Height(height), seed)?,
        None => MazeGenerator::new(Width(width), Height(height))?,
    };
    maze.generate()?;

    if !args.flag_save_edges.is_empty() {
        write_text_to_file(&maze.graph().to_edge_list(), &args.flag_save_edges)
            .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
    }

    let start_end_points = StartEndPointsDisplay::new(smallvec![maze.entrance()],
                                                      smallvec![maze.exit()]);
    let path_display = if args.flag_show_path {
        if maze.solve().is_none() {
            warn!("No route from {} to {}", maze.entrance(), maze.exit());
        }
        maze.path().map(PathDisplay::new)
    } else {
        None
    };

    let mut layers: Vec<&dyn GridDisplay> = Vec::new();
    if args.flag_mark_start_end || (args.flag_show_path && path_display.is_none()) {
        layers.push(&start_end_points);
    }
    if let Some(ref path) = path_display {
        layers.push(path);
    }
    let layered = LayeredDisplay::new(layers);
    let overlay: Option<&dyn GridDisplay> = if args.flag_show_path || args.flag_mark_start_end {
        Some(&layered as &dyn GridDisplay)
    } else {
        None
    };
    let rendering = format!("{}", MazeDisplay::new(maze.graph(), overlay));

    if args.flag_text_out.is_empty() {
        print!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
