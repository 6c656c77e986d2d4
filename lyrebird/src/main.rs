use std::path::{Path, PathBuf};

use verso::error::{Chainable, Result};
use verso::rayon::prelude::*;
use verso::viewer::{self, RunMeta};
use verso::{error, ColorMap, Metric, TokenizeOptions};

xflags::xflags! {
    /// Paint a text file as a square image.
    cmd lyrebird {
        /// Text files to visualize.
        repeated input: PathBuf
        /// List available metrics and color schemes.
        optional --list
        /// Metric to visualize. Defaults to word-freq.
        optional -m, --metric name: String
        /// Color scheme. Defaults to red-blue.
        optional -c, --color name: String
        /// Output image path. Defaults to <input-stem>-<metric>.png.
        optional -o, --output path: PathBuf
        /// Lowercase every token.
        optional --ignore-case
        /// Drop tokens that are not alphanumeric.
        optional --ignore-punctuation
        /// Drop purely numeric tokens.
        optional --ignore-numbers
        /// Also write an interactive HTML viewer next to the image.
        optional --html
    }
}

#[derive(Debug)]
struct Job {
    metric: Metric,
    color: ColorMap,
    options: TokenizeOptions,
    output: Option<PathBuf>,
    html: bool,
}

fn main() {
    env_logger::init();
    let flags = Lyrebird::from_env_or_exit();

    if flags.list {
        list_options();
        return;
    }

    if flags.input.is_empty() {
        println!("{}", Lyrebird::HELP_);
        return;
    }

    let job = match configure(&flags) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let start = std::time::SystemTime::now();
    let failures = flags.input.par_iter()
        .filter_map(|input| run(input, &job).err().map(|e| (input, e)))
        .collect::<Vec<_>>();

    println!("total time: {}ms", start.elapsed().unwrap().as_millis());
    for (input, e) in &failures {
        eprintln!("error: {}: {e}", input.display());
    }

    if !failures.is_empty() {
        std::process::exit(1);
    }
}

fn configure(flags: &Lyrebird) -> Result<Job> {
    if flags.output.is_some() && flags.input.len() > 1 {
        return verso::err! {
            "--output cannot name a single file for multiple inputs",
            "inputs" => flags.input.len(),
        };
    }

    Ok(Job {
        metric: Metric::from_name(flags.metric.as_deref().unwrap_or("word-freq"))?,
        color: ColorMap::from_name(flags.color.as_deref().unwrap_or("red-blue"))?,
        options: TokenizeOptions {
            fold_case: flags.ignore_case,
            drop_punctuation: flags.ignore_punctuation,
            drop_numbers: flags.ignore_numbers,
        },
        output: flags.output.clone(),
        html: flags.html,
    })
}

fn run(input: &Path, job: &Job) -> Result<()> {
    let bytes = std::fs::read(input).chain_with(|| error! {
        "failed to read input file",
        "path" => input.display(),
    })?;

    // Undecodable bytes become replacement characters, never a failure.
    let text = String::from_utf8_lossy(&bytes);
    let tokens = verso::tokenize(&text, job.options);
    println!("{}: {} words ({} before filters)",
        input.display(), tokens.len(), tokens.raw_count);

    let samples = job.metric.measure(&tokens.words);
    let Some(raster) = verso::render(samples, job.color) else {
        eprintln!("{}: no values to render, skipping output", input.display());
        return Ok(());
    };

    let output = job.output.clone().unwrap_or_else(|| default_output(input, job.metric));
    raster.save(&output)?;
    println!("saved: {} ({size}x{size} pixels, {count} values)",
        output.display(), size = raster.side, count = raster.len());

    if job.html {
        let source = input.display().to_string();
        let meta = RunMeta {
            metric: job.metric.name(),
            color: job.color.name(),
            source: &source,
        };

        let page = output.with_extension("html");
        viewer::export(&raster, &meta, &page)?;
        println!("saved: {}", page.display());
    }

    Ok(())
}

fn default_output(input: &Path, metric: Metric) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    PathBuf::from(format!("{}-{}.png", stem.to_string_lossy(), metric))
}

fn list_options() {
    println!("Available metrics:");
    for metric in Metric::ALL {
        println!("  {:20} {}", metric.name(), metric.about());
    }

    println!("\nAvailable color schemes:");
    for map in ColorMap::ALL {
        println!("  {:20} {}", map.name(), map.about());
    }
}
