extern crate clap;
extern crate env_logger;
extern crate escapefield;
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use escapefield::heatmap::Heatmap;
use escapefield::{config, AnimationSchedule, RenderConfig, Region};
use num::Complex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

// "800x600" or "-0.5,1.25": two values either side of a separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let left = T::from_str(&s[..index]).ok()?;
    let right = T::from_str(&s[index + 1..]).ok()?;
    Some((left, right))
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| err.to_string())
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const RENDER: &str = "render";
const ANIMATE: &str = "animate";
const OUTPUT: &str = "output";
const DIRECTORY: &str = "directory";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const FRAMES: &str = "frames";
const INTERVAL: &str = "interval";
const MIN_ZOOM: &str = "min-zoom";
const FAITHFUL: &str = "faithful";

// Initial frame of an animation, drawn before the schedule starts.
const INITIAL_ITERATIONS: u32 = 50;

fn size_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(SIZE)
        .required(false)
        .long(SIZE)
        .short("s")
        .takes_value(true)
        .default_value("500x500")
        .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
        .help("Size of output image")
}

fn threads_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(THREADS)
        .required(false)
        .long(THREADS)
        .short("t")
        .takes_value(true)
        .validator(|s| {
            validate_range(
                &s,
                1,
                1024,
                "Could not parse thread count",
                "Thread count must be between 1 and 1024",
            )
        })
        .help("Number of threads to use in solver (default: one per core)")
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name(RENDER)
                .about("Render a single heatmap")
                .arg(
                    Arg::with_name(OUTPUT)
                        .required(true)
                        .long(OUTPUT)
                        .short("o")
                        .takes_value(true)
                        .help("Output file (binary PPM)"),
                )
                .arg(size_arg())
                .arg(
                    Arg::with_name(LEFTLOWER)
                        .required(false)
                        .long(LEFTLOWER)
                        .short("l")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value("-2.5,-1.5")
                        .validator(|s| {
                            validate_pair::<f64>(&s, ',', "Could not parse left lower corner")
                        })
                        .help("Left lower corner of the mandelbrot space"),
                )
                .arg(
                    Arg::with_name(RIGHTUPPER)
                        .required(false)
                        .long(RIGHTUPPER)
                        .short("r")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .default_value("1.0,1.5")
                        .validator(|s| {
                            validate_pair::<f64>(&s, ',', "Could not parse right upper corner")
                        })
                        .help("Right upper corner of the mandelbrot space"),
                )
                .arg(
                    Arg::with_name(ITERATIONS)
                        .required(false)
                        .long(ITERATIONS)
                        .short("i")
                        .takes_value(true)
                        .default_value("100")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                1_000_000,
                                "Could not parse iteration count",
                                "Iteration count must be between 1 and 1000000",
                            )
                        })
                        .help("Maximum iterations per point"),
                )
                .arg(threads_arg()),
        )
        .subcommand(
            SubCommand::with_name(ANIMATE)
                .about("Render the zoom animation as numbered frames")
                .arg(
                    Arg::with_name(DIRECTORY)
                        .required(true)
                        .long(DIRECTORY)
                        .short("d")
                        .takes_value(true)
                        .help("Directory to write frames into"),
                )
                .arg(size_arg())
                .arg(
                    Arg::with_name(FRAMES)
                        .required(false)
                        .long(FRAMES)
                        .short("f")
                        .takes_value(true)
                        .default_value("100")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1,
                                10_000,
                                "Could not parse frame count",
                                "Frame count must be between 1 and 10000",
                            )
                        })
                        .help("Number of scheduled frames"),
                )
                .arg(
                    Arg::with_name(INTERVAL)
                        .required(false)
                        .long(INTERVAL)
                        .takes_value(true)
                        .default_value("100")
                        .validator(|s| {
                            validate_range(
                                &s,
                                0,
                                60_000,
                                "Could not parse frame interval",
                                "Frame interval must be between 0 and 60000 ms",
                            )
                        })
                        .help("Milliseconds between frames"),
                )
                .arg(
                    Arg::with_name(MIN_ZOOM)
                        .required(false)
                        .long(MIN_ZOOM)
                        .takes_value(true)
                        .default_value("0.001")
                        .validator(|s| {
                            validate_range(
                                &s,
                                1e-12,
                                1.5,
                                "Could not parse minimum zoom",
                                "Minimum zoom must be positive and at most 1.5",
                            )
                        })
                        .help("Smallest half-width the zoom may reach"),
                )
                .arg(
                    Arg::with_name(FAITHFUL)
                        .long(FAITHFUL)
                        .help("Ignore --min-zoom and follow the zoom schedule exactly"),
                )
                .arg(threads_arg()),
        )
        .get_matches()
}

fn image_size(matches: &ArgMatches) -> Result<(usize, usize), failure::Error> {
    parse_pair(matches.value_of(SIZE).unwrap_or("500x500"), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))
}

fn parsed<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| failure::err_msg(format!("Could not parse {}", name)))
}

fn threads(matches: &ArgMatches) -> Result<usize, failure::Error> {
    if matches.is_present(THREADS) {
        parsed(matches, THREADS)
    } else {
        Ok(num_cpus::get())
    }
}

fn render(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height) = image_size(matches)?;
    let leftlower = matches
        .value_of(LEFTLOWER)
        .and_then(parse_complex)
        .ok_or_else(|| failure::err_msg("Error parsing left lower point"))?;
    let rightupper = matches
        .value_of(RIGHTUPPER)
        .and_then(parse_complex)
        .ok_or_else(|| failure::err_msg("Error parsing right upper point"))?;

    let config = RenderConfig {
        width,
        height,
        region: Region::from_corners(leftlower, rightupper),
        max_iter: parsed(matches, ITERATIONS)?,
        threads: threads(matches)?,
    };
    let generator = config.generator()?;
    let started = Instant::now();
    let field = generator.render(config.threads)?;
    info!(
        "Rendered {}x{} field at {} iterations in {:?}",
        generator.plane().width(),
        generator.plane().height(),
        generator.max_iter(),
        started.elapsed()
    );

    let outfile = matches
        .value_of(OUTPUT)
        .ok_or_else(|| failure::err_msg("No output file"))?;
    Heatmap::new(&field, &config.region).save(outfile)?;
    Ok(())
}

fn frame_path(directory: &Path, number: u32) -> String {
    directory
        .join(format!("frame_{:03}.ppm", number))
        .to_string_lossy()
        .into_owned()
}

fn animate(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height) = image_size(matches)?;
    let threads = threads(matches)?;
    let frames: u32 = parsed(matches, FRAMES)?;
    let interval = Duration::from_millis(parsed(matches, INTERVAL)?);
    let schedule = if matches.is_present(FAITHFUL) {
        AnimationSchedule::faithful()
    } else {
        AnimationSchedule::clamped(parsed(matches, MIN_ZOOM)?)
    };
    debug!("Animating {} frames with zoom policy {:?}", frames, schedule.policy());

    let directory = Path::new(
        matches
            .value_of(DIRECTORY)
            .ok_or_else(|| failure::err_msg("No output directory"))?,
    );
    fs::create_dir_all(directory)?;

    let initial = RenderConfig {
        width,
        height,
        region: config::REGION,
        max_iter: INITIAL_ITERATIONS,
        threads,
    };
    Heatmap::new(&initial.render()?, &initial.region).save(frame_path(directory, 0))?;

    for frame in 0..frames {
        let started = Instant::now();
        let (field, params) = schedule.frame_field(frame, width, height, threads)?;
        Heatmap::new(&field, &params.region).save(frame_path(directory, frame + 1))?;
        info!(
            "Frame {}: {} iterations over {:?} in {:?}",
            frame,
            params.max_iter,
            params.region,
            started.elapsed()
        );
        let spent = started.elapsed();
        if spent < interval {
            thread::sleep(interval - spent);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    let result = match matches.subcommand() {
        (RENDER, Some(sub)) => render(sub),
        (ANIMATE, Some(sub)) => animate(sub),
        _ => Err(failure::err_msg("No subcommand given")),
    };
    if let Err(e) = result {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
