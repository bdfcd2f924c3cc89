//! ChunkMode - How the per-file path under a batch folder is derived

use serde::{Deserialize, Serialize};

/// How the path appended after `<target>/<batch>/` is computed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChunkMode {
    /// Path relative to the source root
    #[default]
    Relative,

    /// Path with its grandparent directory stripped (`<parent>/<file>`)
    Legacy,
}
