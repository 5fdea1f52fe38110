//! # 美化输出工具
//!
//! 提供统一的终端输出样式。
//!
//! 结果行（`Fixed: <文件名>`、`Total files fixed: <N>`）由 `format_*`
//! 生成纯文本，由调用方写到 stdout；其余带颜色前缀的提示信息全部走 stderr，
//! 保证 stdout 只包含结果。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 单个已修复文件的结果行
pub fn format_fixed(file_name: &str, dry_run: bool) -> String {
    if dry_run {
        format!("Would fix: {}", file_name)
    } else {
        format!("Fixed: {}", file_name)
    }
}

/// 修复总数行
pub fn format_total(count: usize, dry_run: bool) -> String {
    if dry_run {
        format!("Total files to fix: {}", count)
    } else {
        format!("Total files fixed: {}", count)
    }
}

/// 中途出错时的已完成统计行
pub fn format_aborted(fixed: usize, processed: usize, total: usize) -> String {
    format!(
        "Total files fixed so far: {} (aborted after {} of {} files)",
        fixed, processed, total
    )
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    eprintln!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    eprintln!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    eprintln!("\n{}", line.dimmed());
    eprintln!("  {}", title.bold());
    eprintln!("{}\n", line.dimmed());
}
