//! # scan 子命令 CLI 定义
//!
//! 只读扫描，列出含旧地址的文件及匹配统计
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use super::{RuleArgs, TargetArgs};
use clap::Args;
use std::path::PathBuf;

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub rule: RuleArgs,

    /// Also write the report to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
