//! # fix 子命令 CLI 定义
//!
//! 就地改写硬编码 API 地址
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fix.rs`

use super::{RuleArgs, TargetArgs};
use crate::rewrite::ImportFallback;
use clap::Args;

/// fix 子命令参数
#[derive(Args, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub rule: RuleArgs,

    /// What to do when the anchor import line is missing
    #[arg(long, value_enum, default_value_t = ImportFallback::Skip)]
    pub import_fallback: ImportFallback,

    /// Report what would change without writing files
    #[arg(short = 'n', long, default_value_t = false)]
    pub dry_run: bool,

    /// Also list files that were skipped or left unchanged
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
