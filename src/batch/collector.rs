//! # 文件收集器
//!
//! 根据扫描根目录和文件名模式收集候选文件列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配文件名（逗号分隔多模式）
//! - 默认递归目录搜索，跳过根目录以下以 `.` 开头的文件和目录
//! - 结果排序，保证多次运行顺序一致
//!
//! ## 依赖关系
//! - 被 `commands/fix.rs`, `commands/scan.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, UrlfixError};

use glob::Pattern;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 扫描根路径
    root: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            patterns: vec!["*".to_string()],
            recursive: true,
        }
    }

    /// 按扩展名过滤（`jsx` 或 `.jsx`）
    pub fn with_extension(self, extension: &str) -> Self {
        let ext = extension.trim().trim_start_matches('.');
        self.with_pattern(&format!("*.{}", ext))
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        if !self.root.is_dir() {
            return Err(UrlfixError::DirectoryNotFound {
                path: self.root.display().to_string(),
            });
        }

        let patterns = self.compile_patterns()?;
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).display().to_string();
                UrlfixError::FileReadError {
                    path,
                    source: e.into(),
                }
            })?;

            if entry.file_type().is_file() && Self::matches_any(&patterns, entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn compile_patterns(&self) -> Result<Vec<Pattern>> {
        self.patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| UrlfixError::InvalidPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// 检查文件名是否匹配任一模式
    fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        patterns.iter().any(|p| p.matches(filename))
    }
}

/// 以 `.` 开头的名称（`.cache`, `.eslintrc.jsx`）
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|n| n.starts_with('.')).unwrap_or(false)
}
