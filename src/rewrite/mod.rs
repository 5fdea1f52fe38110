//! # 重写规则模块
//!
//! 将硬编码的 `http://localhost:5000/api` 地址改写为共享 helper 调用。
//!
//! ## 功能
//! - 标记子串快速过滤
//! - helper import 检测与插入
//! - 单引号字符串和模板字符串两种前缀替换
//! - 扫描统计（供 `scan` 子命令使用）
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/` 使用
//! - 使用 `regex` 进行全局替换

pub mod rule;

pub use rule::{ImportFallback, RewriteRule, RuleConfig};
