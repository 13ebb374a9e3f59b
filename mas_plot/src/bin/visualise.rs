use clap::{App, Arg};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use mas_exp::Metric;
use mas_plot::{PlotFmt, ResultsDB, Search};

// folder where all plots will be stored
const DEFAULT_PLOT_DIR: &str = "plots";

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    mas_exp::init_tracing();

    let (inputs, plot_dir, metrics) = parse_args()?;
    let fmt = PlotFmt::overview();

    for input in inputs {
        let db = ResultsDB::load(&input)
            .wrap_err_with(|| format!("load results {}", input))?;

        for &metric in &metrics {
            let search = Search::new(metric);
            let plan = db
                .layout(&search, &fmt)
                .wrap_err_with(|| format!("lay out {} of {}", metric, input))?;
            let output_file = fmt.output_file(&plot_dir, &input, metric);
            mas_plot::bar_plot(&plan, metric, &fmt, &output_file)
                .wrap_err_with(|| format!("plot {} of {}", metric, input))?;
        }
    }
    Ok(())
}

fn parse_args() -> Result<(Vec<String>, String, Vec<Metric>), Report> {
    let matches = App::new("visualise")
        .version("0.1")
        .about("Plots every metric of one or more result files, comparing configurations per scenario.")
        .arg(
            Arg::with_name("input")
                .index(1)
                .value_name("INPUT")
                .help("result files to plot")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output-dir")
                .value_name("OUTPUT_DIR")
                .help("folder where all plots will be stored; by default, 'plots'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("metrics")
                .long("metrics")
                .value_name("METRICS")
                .help("comma-separated list of metrics to plot; by default, the simulation metrics")
                .takes_value(true),
        )
        .get_matches();

    let inputs: Vec<_> = matches
        .values_of("input")
        .map(|inputs| inputs.map(String::from).collect())
        .unwrap_or_default();
    let plot_dir = matches
        .value_of("output_dir")
        .unwrap_or(DEFAULT_PLOT_DIR)
        .to_string();
    let metrics = match matches.value_of("metrics") {
        Some(metrics) => {
            Metric::parse_list(metrics).wrap_err("parse metrics")?
        }
        None => Metric::BASIC.to_vec(),
    };

    tracing::debug!("inputs: {:?}", inputs);
    tracing::debug!("plot dir: {:?}", plot_dir);
    tracing::debug!("metrics: {:?}", metrics);

    Ok((inputs, plot_dir, metrics))
}
