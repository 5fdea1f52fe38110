//! # 批量处理模块
//!
//! 提供候选文件收集和顺序改写能力。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 收集匹配文件列表
//! - 顺序处理，首个 I/O 错误即中止
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `walkdir`, `glob` 收集文件
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, FixReport, ProcessResult};
