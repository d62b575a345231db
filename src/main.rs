use std::env;
use std::io::{self, Write};
use std::process;

use tracing::{Level, debug, error, info};

use ::moving_average::config::{self, LinePrompt, OutputFormat, Resolution, RunConfig, Source};
use ::moving_average::generator::{make_random_array, rng_from_seed};
use ::moving_average::loader::{self, Series};
use ::moving_average::report::{self, Report, timed};
use ::moving_average::{Error, moving_average};

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_series(config: &RunConfig) -> Result<Vec<Series>, Error> {
    match &config.source {
        Source::Random { number } => {
            let mut rng = rng_from_seed(config.seed);
            let values = make_random_array(*number, config.range, &mut rng);
            debug!(count = values.len(), min = config.range.min(), max = config.range.max(), "generated values");
            Ok(vec![Series {
                name: "random".to_string(),
                values,
            }])
        }
        Source::Files { pattern, column } => Ok(loader::load_glob(pattern, *column)?),
    }
}

fn run(config: &RunConfig) -> Result<(), Error> {
    let series = load_series(config)?;
    let named = matches!(config.source, Source::Files { .. });

    let mut reports = Vec::with_capacity(series.len());
    for s in series {
        let result = timed(|| moving_average(&s.values, config.window_size));
        let report = Report::new(s.name, config.window_size, result);
        info!(
            name = %report.name,
            count = report.count,
            window_size = report.window_size,
            elapsed_nanos = report.elapsed_nanos,
            "computed moving average"
        );
        reports.push(report);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => {
            for r in &reports {
                r.write_text(&mut out, config.precision, named)?;
            }
        }
        OutputFormat::Json => report::write_json(&mut out, &reports)?,
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    init_logging(config::wants_verbose(&args));

    let stdin = io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());
    let config = match config::resolve(&args, &mut prompt) {
        Ok(Resolution::Run(config)) => config,
        Ok(Resolution::Help(usage)) => {
            println!("{}", usage);
            return;
        }
        Err(e) => {
            let e = Error::from(e);
            error!("{}", e);
            eprintln!("{}", config::usage());
            process::exit(e.exit_code());
        }
    };
    drop(prompt);

    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}
