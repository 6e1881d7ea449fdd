use seamcarve::analysis::{analyze, growth_table, lower_bound_log, MAX_EXACT_ROWS};
use seamcarve::energy::energy_to_image;
use seamcarve::{
    compute_energy, count_possible_seams, estimate_possible_seams_log, seamcarve, CarveError,
    CarveOptions, Orientation, PixelBuffer, Strategy,
};
use std::convert::TryFrom;
use std::process;

extern crate clap;
extern crate image;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::LevelFilter;

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG, when set, wins over --verbose.
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    )
    .try_init();
}

fn load(path: &str) -> Result<PixelBuffer, CarveError> {
    let image = image::open(path)?.to_rgba8();
    PixelBuffer::try_from(image)
}

// Validated by clap before we get here.
fn number<T: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|v| v.parse().ok())
}

fn is_number(v: String) -> Result<(), String> {
    v.parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a whole number", v))
}

// Seam counting is quadratic in the grid, so keep it to what prints
// in a moment.
const MAX_COUNT_DIMENSION: u32 = 100;

fn is_count_dimension(v: String) -> Result<(), String> {
    match v.parse::<u32>() {
        Ok(n) if n >= 1 && n <= MAX_COUNT_DIMENSION => Ok(()),
        _ => Err(format!(
            "'{}' must be a whole number from 1 to {}",
            v, MAX_COUNT_DIMENSION
        )),
    }
}

fn carve(matches: &ArgMatches) -> Result<(), CarveError> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let mut buffer = load(input)?;
    let strategy = matches
        .value_of("strategy")
        .unwrap_or("dp")
        .parse::<Strategy>()?;
    let options = CarveOptions::new(
        number(matches, "width").unwrap_or_else(|| buffer.width()),
        number(matches, "height").unwrap_or_else(|| buffer.height()),
    )
    .with_strategy(strategy);

    let removed = seamcarve(&mut buffer, &options)?;
    println!(
        "Removed {} seam(s) with {}. Final size: {}x{}",
        removed,
        strategy,
        buffer.width(),
        buffer.height()
    );
    buffer.into_image().save(output)?;
    Ok(())
}

fn analyze_image(matches: &ArgMatches) -> Result<(), CarveError> {
    let buffer = load(matches.value_of("input").unwrap_or_default())?;
    let energy = compute_energy(&buffer);
    for orientation in [Orientation::Vertical, Orientation::Horizontal].iter() {
        let report = analyze(&energy, *orientation)?;
        println!("\n{}", report.table);
        println!("\n=== Seam Comparison: DP vs Greedy ===");
        println!("{}", report.divergence);
    }
    Ok(())
}

fn energy_map(matches: &ArgMatches) -> Result<(), CarveError> {
    let buffer = load(matches.value_of("input").unwrap_or_default())?;
    let picture = energy_to_image(&compute_energy(&buffer));
    picture.save(matches.value_of("output").unwrap_or_default())?;
    Ok(())
}

fn count(matches: &ArgMatches) {
    let rows: usize = number(matches, "rows").unwrap_or(10);
    let cols: usize = number(matches, "cols").unwrap_or(10);

    println!("=== Number of Possible Seams ===");
    println!("Image dimensions: {} rows x {} cols", rows, cols);
    if rows <= MAX_EXACT_ROWS {
        println!(
            "Exact count: {} possible seams",
            count_possible_seams(rows, cols)
        );
    }
    println!(
        "Number of possible seams ~ 10^{:.4}",
        estimate_possible_seams_log(rows, cols)
    );

    println!("\nExponential growth:");
    for (m, seams) in growth_table(rows, cols) {
        println!("  m={}: {}", m, seams);
    }
    println!(
        "\nLower bound: at least 2^(m-1) = 2^{} ~ 10^{:.4}",
        rows.saturating_sub(1),
        lower_bound_log(rows)
    );
}

fn main() {
    let input = Arg::with_name("input")
        .help("The image to read")
        .required(true)
        .index(1);
    let output = Arg::with_name("output")
        .help("Where to write the result")
        .required(true)
        .index(2);

    let matches = App::new("seamcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image shrinking by seam carving")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .global(true)
                .help("Log every seam removed"),
        )
        .subcommand(
            SubCommand::with_name("carve")
                .about("Shrink an image to a target size")
                .arg(input.clone())
                .arg(output.clone())
                .arg(
                    Arg::with_name("width")
                        .long("width")
                        .takes_value(true)
                        .validator(is_number)
                        .help("Target width (defaults to the current width)"),
                )
                .arg(
                    Arg::with_name("height")
                        .long("height")
                        .takes_value(true)
                        .validator(is_number)
                        .help("Target height (defaults to the current height)"),
                )
                .arg(
                    Arg::with_name("strategy")
                        .long("strategy")
                        .takes_value(true)
                        .possible_values(&["dp", "greedy"])
                        .default_value("dp")
                        .help("Seam finder to use"),
                ),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Compare the optimal and greedy seam finders on an image")
                .arg(input.clone()),
        )
        .subcommand(
            SubCommand::with_name("energy")
                .about("Write an image's energy map as a greyscale image")
                .arg(input)
                .arg(output),
        )
        .subcommand(
            SubCommand::with_name("count")
                .about("Count the possible seams in an m x n grid")
                .arg(
                    Arg::with_name("rows")
                        .long("rows")
                        .takes_value(true)
                        .validator(is_count_dimension)
                        .default_value("10"),
                )
                .arg(
                    Arg::with_name("cols")
                        .long("cols")
                        .takes_value(true)
                        .validator(is_count_dimension)
                        .default_value("10"),
                ),
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        ("carve", Some(sub)) => {
            init_logging(sub.is_present("verbose"));
            carve(sub)
        }
        ("analyze", Some(sub)) => {
            init_logging(sub.is_present("verbose"));
            analyze_image(sub)
        }
        ("energy", Some(sub)) => {
            init_logging(sub.is_present("verbose"));
            energy_map(sub)
        }
        ("count", Some(sub)) => {
            init_logging(sub.is_present("verbose"));
            count(sub);
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(e) = outcome {
        eprintln!("seamcarve: {}", e);
        process::exit(1);
    }
}
