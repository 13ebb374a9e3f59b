use clap::{App, Arg};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use mas_exp::SerializationFormat;
use mas_plot::ResultsDB;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    mas_exp::init_tracing();

    let matches = App::new("pivot")
        .version("0.1")
        .about("Writes a result file indexed by configuration instead of by resource.")
        .arg(
            Arg::with_name("input")
                .index(1)
                .value_name("INPUT")
                .help("result file to pivot")
                .required(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .value_name("FILE")
                .help("write the pivoted results as json to this file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("csv")
                .long("csv")
                .value_name("FILE")
                .help("write the pivoted results as csv to this file")
                .takes_value(true),
        )
        .get_matches();

    let input = matches.value_of("input").unwrap_or_default();
    let json = matches.value_of("json");
    let csv = matches.value_of("csv");
    if json.is_none() && csv.is_none() {
        eyre::bail!("nothing to do: pass --json and/or --csv");
    }

    let db = ResultsDB::load(input)
        .wrap_err_with(|| format!("load results {}", input))?;
    if let Some(json) = json {
        mas_exp::serialize(
            db.experiment(),
            json,
            SerializationFormat::JsonPretty,
        )
        .wrap_err_with(|| format!("write {}", json))?;
        tracing::info!("json written to {}", json);
    }
    if let Some(csv) = csv {
        db.to_csv(csv).wrap_err_with(|| format!("write {}", csv))?;
    }
    Ok(())
}
