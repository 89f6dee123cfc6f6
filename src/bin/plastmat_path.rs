use plastmat::util::PathInput;
use plastmat::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "plastmat_path",
    about = "Drives a material point along a strain path and writes the stress history as JSON"
)]
struct Options {
    /// JSON file with the material definition and the strains
    input: String,

    /// Output JSON file (the results are printed to stdout if not given)
    #[structopt(short, long)]
    output: Option<String>,
}

fn main() -> Result<(), StrError> {
    env_logger::init();

    // parse options
    let options = Options::from_args();

    // load data
    let input = PathInput::read_json(&options.input)?;

    // run simulation
    let output = input.run().map_err(|err| {
        log::error!("{}", err);
        "material point simulation failed"
    })?;

    // write results
    match &options.output {
        Some(path) => {
            output.write_json(path)?;
            println!("results written to {}", path);
        }
        None => {
            let json = serde_json::to_string_pretty(&output).map_err(|_| "cannot serialize results")?;
            println!("{}", json);
        }
    }
    Ok(())
}
