use clap::{App, Arg};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use mas_exp::Metric;
use mas_plot::{PlotFmt, ResultsDB, Search};

// folder where all plots will be stored
const DEFAULT_PLOT_DIR: &str = "plots";
const DEFAULT_INPUT: &str = "Gallconfigurations_correct.json";

// each Gendreau instance was run under this many scenarios
const DEFAULT_GROUP_SIZE: usize = 3;

// draw order of the configurations compared in the report
const DEFAULT_CONFIGURATIONS: [&str; 6] = [
    "bestfuture simple defaults",
    "bestfuture trivial",
    "early simple",
    "early trivial",
    "greedy",
    "greedy global",
];

struct Args {
    input: String,
    plot_dir: String,
    configurations: Vec<String>,
    group_size: usize,
    metrics: Vec<Metric>,
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    mas_exp::init_tracing();

    let args = parse_args()?;
    let fmt = PlotFmt::grouped();

    let db = ResultsDB::load(&args.input)
        .wrap_err_with(|| format!("load results {}", args.input))?;

    for metric in args.metrics {
        let mut search = Search::new(metric);
        search
            .configurations(args.configurations.iter().cloned())
            .scenario_group_size(args.group_size);
        let plan = db
            .layout(&search, &fmt)
            .wrap_err_with(|| format!("lay out {}", metric))?;
        let output_file = fmt.output_file(&args.plot_dir, &args.input, metric);
        mas_plot::bar_plot(&plan, metric, &fmt, &output_file)
            .wrap_err_with(|| format!("plot {}", metric))?;
    }
    Ok(())
}

fn parse_args() -> Result<Args, Report> {
    let matches = App::new("plot_grouped")
        .version("0.1")
        .about("Plots Gendreau metrics with resources grouped per scenario.")
        .arg(
            Arg::with_name("input")
                .index(1)
                .value_name("INPUT")
                .help("result file to plot; by default, 'Gallconfigurations_correct.json'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output-dir")
                .value_name("OUTPUT_DIR")
                .help("folder where all plots will be stored; by default, 'plots'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("configurations")
                .long("configurations")
                .value_name("CONFIGURATIONS")
                .help("comma-separated list of configurations, in draw order")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("group_size")
                .long("group-size")
                .value_name("GROUP_SIZE")
                .help("number of consecutive resources per scenario group; by default, 3")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("metrics")
                .long("metrics")
                .value_name("METRICS")
                .help("comma-separated list of metrics to plot; by default, 'gOverTime'")
                .takes_value(true),
        )
        .get_matches();

    let input = matches
        .value_of("input")
        .unwrap_or(DEFAULT_INPUT)
        .to_string();
    let plot_dir = matches
        .value_of("output_dir")
        .unwrap_or(DEFAULT_PLOT_DIR)
        .to_string();
    let configurations = match matches.value_of("configurations") {
        Some(configurations) => configurations
            .split(',')
            .map(str::trim)
            .filter(|configuration| !configuration.is_empty())
            .map(String::from)
            .collect(),
        None => DEFAULT_CONFIGURATIONS.iter().map(|c| c.to_string()).collect(),
    };
    let group_size = match matches.value_of("group_size") {
        Some(size) => size
            .parse()
            .wrap_err_with(|| format!("parse group size {:?}", size))?,
        None => DEFAULT_GROUP_SIZE,
    };
    let metrics = match matches.value_of("metrics") {
        Some(metrics) => {
            Metric::parse_list(metrics).wrap_err("parse metrics")?
        }
        None => vec![Metric::GOverTime],
    };

    tracing::debug!("input: {:?}", input);
    tracing::debug!("plot dir: {:?}", plot_dir);
    tracing::debug!("configurations: {:?}", configurations);
    tracing::debug!("group size: {:?}", group_size);
    tracing::debug!("metrics: {:?}", metrics);

    Ok(Args {
        input,
        plot_dir,
        configurations,
        group_size,
        metrics,
    })
}
