use super::args::*;

pub(crate) mod filter_rewards;
pub(crate) mod generate;
pub(crate) mod init;
pub(crate) mod score;

use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Generate(args) => generate::run(args).await,
        Command::Score(args) => score::run(args),
        Command::FilterRewards(args) => filter_rewards::run(args),
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
