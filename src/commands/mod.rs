//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `rewrite/`, `utils/`
//! - 子模块: fix, scan

pub mod fix;
pub mod scan;

use crate::batch::FileCollector;
use crate::cli::{Commands, RuleArgs, TargetArgs};
use crate::error::Result;
use crate::rewrite::{ImportFallback, RewriteRule, RuleConfig};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fix(args) => fix::execute(args),
        Commands::Scan(args) => scan::execute(args),
    }
}

/// 由命令行参数构建文件收集器
fn build_collector(target: &TargetArgs) -> FileCollector {
    let collector = FileCollector::new(target.root.clone()).recursive(!target.no_recursive);
    match &target.pattern {
        Some(pattern) => collector.with_pattern(pattern),
        None => collector.with_extension(&target.ext),
    }
}

/// 由命令行参数构建重写规则
fn build_rule(rule: &RuleArgs, fallback: ImportFallback) -> Result<RewriteRule> {
    RewriteRule::new(RuleConfig {
        base_url: rule.base_url.clone(),
        helper: rule.helper.clone(),
        aliases: rule.alias.clone(),
        import_path: rule.import_path.clone(),
        anchor: rule.anchor.clone(),
        fallback,
    })
}
