use clap::{App, Arg};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use mas_exp::{RawExperiment, SerializationFormat};

const DEFAULT_BASE: &str = "Gallconfigurations.json";
const DEFAULT_OVERLAY: &str = "Ggreedy.json";
const DEFAULT_OUTPUT: &str = "Gallconfigurations_correct.json";

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    mas_exp::init_tracing();

    let (base_path, overlay_path, output_path) = parse_args();

    let base: RawExperiment = mas_exp::deserialize(&base_path)
        .wrap_err_with(|| format!("load base {}", base_path))?;
    let overlay: RawExperiment = mas_exp::deserialize(&overlay_path)
        .wrap_err_with(|| format!("load overlay {}", overlay_path))?;
    tracing::info!(
        "merging {} ({} resources) with {} ({} resources)",
        base_path,
        base.len(),
        overlay_path,
        overlay.len()
    );

    let merged = mas_exp::merge(base, overlay).wrap_err("merge results")?;
    mas_exp::serialize(&merged, &output_path, SerializationFormat::Json)
        .wrap_err_with(|| format!("write {}", output_path))?;
    tracing::info!("merged results written to {}", output_path);
    Ok(())
}

fn parse_args() -> (String, String, String) {
    let matches = App::new("merge")
        .version("0.1")
        .about("Merges the configurations of two result files.")
        .arg(
            Arg::with_name("base")
                .index(1)
                .value_name("BASE")
                .help("result file to merge into; by default, 'Gallconfigurations.json'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("overlay")
                .index(2)
                .value_name("OVERLAY")
                .help("result file whose configurations are added; by default, 'Ggreedy.json'")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .index(3)
                .value_name("OUTPUT")
                .help("where the merged results are written; by default, 'Gallconfigurations_correct.json'")
                .takes_value(true),
        )
        .get_matches();

    let base = matches.value_of("base").unwrap_or(DEFAULT_BASE).to_string();
    let overlay = matches
        .value_of("overlay")
        .unwrap_or(DEFAULT_OVERLAY)
        .to_string();
    let output = matches
        .value_of("output")
        .unwrap_or(DEFAULT_OUTPUT)
        .to_string();

    tracing::debug!("base: {:?}", base);
    tracing::debug!("overlay: {:?}", overlay);
    tracing::debug!("output: {:?}", output);

    (base, overlay, output)
}
