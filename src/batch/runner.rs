//! # 批量执行器
//!
//! 顺序处理候选文件：读取、变换、仅在内容改变时写回。
//!
//! ## 功能
//! - 单线程逐个处理，遇到第一个 I/O 错误即中止
//! - 进度条显示
//! - 汇总统计（中止时保留已完成部分）
//!
//! ## 依赖关系
//! - 被 `commands/fix.rs` 调用
//! - 使用 `rewrite/rule.rs` 的 RewriteRule
//! - 使用 `utils/progress.rs` 创建进度条

use crate::error::{Result, UrlfixError};
use crate::rewrite::RewriteRule;
use crate::utils::progress;

use std::fs;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 内容已改写（dry-run 时表示将会改写）
    Fixed(PathBuf),
    /// 含标记但规则未产生变化
    Unchanged(PathBuf),
    /// 不含标记，直接跳过
    Skipped(PathBuf),
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct FixReport {
    /// 已修复文件名（不含目录）
    pub fixed: Vec<String>,
    /// 含标记但未改变的数量
    pub unchanged: usize,
    /// 跳过数量
    pub skipped: usize,
}

impl FixReport {
    /// 合并处理结果
    pub fn merge(&mut self, result: &ProcessResult) {
        match result {
            ProcessResult::Fixed(path) => self.fixed.push(file_name(path)),
            ProcessResult::Unchanged(_) => self.unchanged += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
        }
    }

    /// 修复数量
    pub fn fixed_count(&self) -> usize {
        self.fixed.len()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.fixed.len() + self.unchanged + self.skipped
    }
}

/// 批量执行器
pub struct BatchRunner<'a> {
    rule: &'a RewriteRule,
    /// 只报告不写回
    dry_run: bool,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(rule: &'a RewriteRule) -> Self {
        Self {
            rule,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 处理单个文件
    pub fn process_file(&self, path: &Path) -> Result<ProcessResult> {
        let original = fs::read_to_string(path).map_err(|e| UrlfixError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let content = match self.rule.apply(&original) {
            Some(content) => content,
            None => return Ok(ProcessResult::Skipped(path.to_path_buf())),
        };

        if content == original {
            return Ok(ProcessResult::Unchanged(path.to_path_buf()));
        }

        if !self.dry_run {
            fs::write(path, content).map_err(|e| UrlfixError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        Ok(ProcessResult::Fixed(path.to_path_buf()))
    }

    /// 顺序处理文件列表
    ///
    /// `report` 由调用方持有，出错返回时其中仍是已完成文件的统计。
    /// `on_result` 在进度条挂起期间调用，可以安全地打印。
    pub fn run<F>(&self, files: &[PathBuf], report: &mut FixReport, mut on_result: F) -> Result<()>
    where
        F: FnMut(&ProcessResult),
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Rewriting");

        for file in files {
            let result = match self.process_file(file) {
                Ok(result) => result,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };

            pb.suspend(|| on_result(&result));
            report.merge(&result);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(())
    }
}

/// 取文件名用于报告
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
