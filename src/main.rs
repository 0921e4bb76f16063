use std::process;
use std::time::Duration;

use clap::{value_t, App, Arg, ArgMatches};
use log::debug;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

use sokoban_astar::clock::SystemClock;
use sokoban_astar::config::{Config, Dedup, HeuristicChoice, DEFAULT_GREEDY_ABOVE};
use sokoban_astar::solver::{Outcome, Solver, Stats};
use sokoban_astar::LoadLevel;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-astar")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves Sokoban levels in XSB format using A*")
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["matching", "greedy", "auto"])
                .default_value("auto")
                .help("cost-to-go estimate, auto picks greedy for many boxes"),
        )
        .arg(
            Arg::with_name("greedy-above")
                .long("greedy-above")
                .takes_value(true)
                .value_name("N")
                .help("box count above which auto uses greedy [default: 20]"),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .takes_value(true)
                .value_name("SECS")
                .help("time budget in seconds, 0 means unbounded [default: 15]"),
        )
        .arg(
            Arg::with_name("max-nodes")
                .long("max-nodes")
                .takes_value(true)
                .value_name("N")
                .help("stop after creating this many search nodes"),
        )
        .arg(
            Arg::with_name("exact-states")
                .long("exact-states")
                .help("tell states apart by the player position too, slower but shortest solutions"),
        )
        .arg(
            Arg::with_name("no-deadlocks")
                .long("no-deadlocks")
                .help("don't prune deadlocked states"),
        )
        .arg(
            Arg::with_name("stats-table")
                .long("stats-table")
                .help("print stats by depth as a table"),
        )
        .arg(
            Arg::with_name("print-states")
                .long("print-states")
                .help("print the level after every push of the solution"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let config = config_from_args(&matches);
    debug!("{:?}", config);

    // required so clap already exited if it's missing
    let path = matches.value_of("file").unwrap_or_default();

    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    println!("Solving {}...", path);
    let solver = Solver::new(&level, config).unwrap_or_else(|err| {
        eprintln!("Invalid level {}: {}", path, err);
        process::exit(1);
    });
    let solver_ok = solver.search(&SystemClock::new());

    if matches.is_present("stats-table") {
        print_totals(&solver_ok.stats);
        stats_table(&solver_ok.stats).printstd();
        println!();
    } else {
        println!("{}", solver_ok.stats);
    }

    match solver_ok.outcome {
        Outcome::Solved(ref moves) => {
            if matches.is_present("print-states") {
                println!("Found solution:");
                print!("{}", level.xsb_solution(moves, false));
            }
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
        ref other => {
            println!("{}", other);
            process::exit(2);
        }
    }
}

fn config_from_args(matches: &ArgMatches<'_>) -> Config {
    let mut config = Config::default();

    let greedy_above = if matches.is_present("greedy-above") {
        value_t!(matches, "greedy-above", usize).unwrap_or_else(|e| e.exit())
    } else {
        DEFAULT_GREEDY_ABOVE
    };
    config.heuristic = match matches.value_of("heuristic") {
        Some("matching") => HeuristicChoice::Matching,
        Some("greedy") => HeuristicChoice::Greedy,
        _ => HeuristicChoice::Auto { greedy_above },
    };

    if matches.is_present("timeout") {
        let secs = value_t!(matches, "timeout", u64).unwrap_or_else(|e| e.exit());
        config.time_budget = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
    }
    if matches.is_present("max-nodes") {
        config.max_nodes = Some(value_t!(matches, "max-nodes", usize).unwrap_or_else(|e| e.exit()));
    }
    if matches.is_present("exact-states") {
        config.dedup = Dedup::BoxesAndPlayer;
    }
    if matches.is_present("no-deadlocks") {
        config.deadlocks = false;
    }

    config
}

fn print_totals(stats: &Stats) {
    println!("States created total: {}", stats.total_created().separated_string());
    println!("Unique visited total: {}", stats.total_visited().separated_string());
    println!("Reached duplicates total: {}", stats.total_duplicates().separated_string());
    println!("Deadlocks pruned total: {}", stats.total_deadlocks().separated_string());
    println!();
}

fn stats_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(
        ["Depth", "Created", "Unique", "Duplicates", "Deadlocks"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for (i, depth) in stats.depths().iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&i.to_string()),
            Cell::new(&depth.created.separated_string()),
            Cell::new(&depth.visited.separated_string()),
            Cell::new(&depth.duplicates.separated_string()),
            Cell::new(&depth.deadlocks.separated_string()),
        ]));
    }
    table
}
