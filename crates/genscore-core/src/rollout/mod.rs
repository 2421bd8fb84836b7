//! Reward-based filtering of rollout datasets.

pub mod filter;

pub use filter::{
    cumulative_reward, filter_numbered_by_reward, filter_rollouts_file, filter_top_by_reward,
    FilterStats,
};
