use crate::cli::args::InitArgs;
use crate::exit_codes;
use genscore_core::config::write_sample_config;

pub fn run(args: InitArgs) -> anyhow::Result<i32> {
    if let Err(e) = write_sample_config(&args.config, args.force) {
        eprintln!("error: {}", e);
        return Ok(exit_codes::CONFIG_ERROR);
    }
    eprintln!("Wrote {}", args.config.display());
    Ok(exit_codes::OK)
}
