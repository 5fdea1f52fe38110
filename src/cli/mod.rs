//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fix`: 改写硬编码的 API 地址
//! - `scan`: 只读扫描，统计匹配情况
//!
//! ## 配置
//! 扫描根目录和扩展名可以通过 `URLFIX_ROOT` / `URLFIX_EXT` 环境变量给出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fix, scan

pub mod fix;
pub mod scan;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// urlfix - 前端源码 API 地址批量改写工具
#[derive(Parser)]
#[command(name = "urlfix")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Rewrite hardcoded localhost API URLs to a shared helper", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite hardcoded API URLs in place
    Fix(fix::FixArgs),

    /// Report files containing the hardcoded host without modifying them
    Scan(scan::ScanArgs),
}

/// 扫描目标（两个子命令共用）
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Root directory (or single file) to scan
    #[arg(env = "URLFIX_ROOT", default_value = "src")]
    pub root: PathBuf,

    /// File extension to match
    #[arg(short, long, env = "URLFIX_EXT", default_value = "jsx")]
    pub ext: String,

    /// Glob pattern(s) for file names, comma separated (overrides --ext)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Only scan the top level of the root directory
    #[arg(long, default_value_t = false)]
    pub no_recursive: bool,
}

/// 重写规则参数（两个子命令共用）
#[derive(Args, Debug, Clone)]
pub struct RuleArgs {
    /// Hardcoded base URL to replace
    #[arg(long, default_value = crate::rewrite::rule::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Helper function that returns the API base URL
    #[arg(long, default_value = crate::rewrite::rule::DEFAULT_HELPER)]
    pub helper: String,

    /// Legacy helper names that also count as an existing import
    #[arg(long, value_delimiter = ',', default_value = crate::rewrite::rule::LEGACY_ALIAS)]
    pub alias: Vec<String>,

    /// Module path used in the inserted import line
    #[arg(long, default_value = crate::rewrite::rule::DEFAULT_IMPORT_PATH)]
    pub import_path: String,

    /// Exact line before which the helper import is inserted
    #[arg(long, default_value = crate::rewrite::rule::DEFAULT_ANCHOR)]
    pub anchor: String,
}
