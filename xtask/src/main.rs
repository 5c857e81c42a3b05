use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use sliderule::{MODEL_NAMES, Mode, RenderOptions};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    let mut options = RenderOptions::default();
    let mut out_dir = default_out_dir();
    let mut names = Vec::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--cutoffs" => options.cutoffs = true,
            "--debug" => options.debug = true,
            "--out" => match rest.next() {
                Some(dir) => out_dir = Utf8PathBuf::from(dir),
                None => {
                    eprintln!("--out needs a directory");
                    std::process::exit(1);
                }
            },
            _ => names.push(arg.clone()),
        }
    }

    let ok = match args[1].as_str() {
        "render" => render_models(&names, options, &out_dir),
        "diagnostic" => render_models(
            &names,
            RenderOptions {
                mode: Mode::Diagnostic,
                ..options
            },
            &out_dir,
        ),
        "layout" => render_layouts(&names, options, &out_dir),
        "list" => {
            for name in MODEL_NAMES {
                println!("{name}");
            }
            true
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            usage();
            false
        }
    };
    if !ok {
        std::process::exit(1);
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command> [args] [--cutoffs] [--debug] [--out DIR]");
    eprintln!("Commands:");
    eprintln!("  render [MODEL...]      Render slide rule sheets (all models by default)");
    eprintln!("  diagnostic [MODEL...]  Render one row per scale");
    eprintln!("  layout FILE...         Render layout files on a plain rule");
    eprintln!("  list                   List the built-in models");
}

fn default_out_dir() -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR")).join("../target/sliderules")
}

fn render_models(names: &[String], options: RenderOptions, out_dir: &Utf8Path) -> bool {
    let names: Vec<&str> = if names.is_empty() {
        MODEL_NAMES.to_vec()
    } else {
        names.iter().map(String::as_str).collect()
    };
    let suffix = match options.mode {
        Mode::SlideRule => "SlideRuleScales",
        Mode::Diagnostic => "Diagnostic",
    };

    let jobs: Vec<(String, Utf8PathBuf)> = names
        .iter()
        .map(|name| (name.to_string(), out_dir.join(format!("{name}.{suffix}.svg"))))
        .collect();
    run(jobs, out_dir, |name| sliderule::render_model(name, &options))
}

fn render_layouts(files: &[String], options: RenderOptions, out_dir: &Utf8Path) -> bool {
    if files.is_empty() {
        eprintln!("layout needs at least one file");
        return false;
    }
    let jobs: Vec<(String, Utf8PathBuf)> = files
        .iter()
        .map(|file| {
            let path = Utf8PathBuf::from(file);
            let stem = path.file_stem().unwrap_or("layout").to_string();
            (file.clone(), out_dir.join(format!("{stem}.svg")))
        })
        .collect();
    run(jobs, out_dir, |file| {
        let source = fs::read_to_string(file).map_err(|e| miette::miette!("{file}: {e}"))?;
        sliderule::render_layout(source.trim_end(), &options)
    })
}

/// Render every job in parallel, each with its own canvas, and report failures
fn run<F>(jobs: Vec<(String, Utf8PathBuf)>, out_dir: &Utf8Path, render: F) -> bool
where
    F: Fn(&str) -> Result<String, miette::Report> + Sync,
{
    if let Err(e) = fs::create_dir_all(out_dir) {
        eprintln!("Failed to create {out_dir}: {e}");
        return false;
    }

    let failures: Vec<String> = jobs
        .par_iter()
        .filter_map(|(input, path)| {
            let result = render(input).and_then(|svg| {
                fs::write(path, svg).map_err(|e| miette::miette!("{path}: {e}"))
            });
            match result {
                Ok(()) => {
                    eprintln!("Wrote {path}");
                    None
                }
                Err(report) => Some(format!("{input}: {report:?}")),
            }
        })
        .collect();

    for failure in &failures {
        eprintln!("{failure}");
    }
    eprintln!("{} rendered, {} failed", jobs.len() - failures.len(), failures.len());
    failures.is_empty()
}
