//! Process exit codes. Part of the CLI contract.

pub const OK: i32 = 0;
pub const EVAL_FAILED: i32 = 1; // generation or scoring failed
pub const CONFIG_ERROR: i32 = 2; // bad config, flags or input files
