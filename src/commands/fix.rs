//! # fix 命令实现
//!
//! 扫描候选文件并就地改写硬编码 API 地址。
//!
//! ## 功能
//! - 收集扩展名匹配的候选文件
//! - 逐个改写，仅在内容变化时写回
//! - stdout 每个修复文件输出一行，最后输出总数
//! - 中途出错时先输出已修复数量再报告错误
//!
//! ## 依赖关系
//! - 使用 `cli/fix.rs` 定义的参数
//! - 使用 `batch/`, `rewrite/`
//! - 使用 `utils/output.rs`

use super::{build_collector, build_rule};
use crate::batch::runner::file_name;
use crate::batch::{BatchRunner, FixReport, ProcessResult};
use crate::cli::fix::FixArgs;
use crate::error::{Result, UrlfixError};
use crate::utils::output;

use std::io::{self, Write};

/// 执行 fix 命令
pub fn execute(args: FixArgs) -> Result<()> {
    let mut stdout = io::stdout();
    fix_tree(&args, &mut stdout)?;
    Ok(())
}

/// 改写目录树，结果行写入 `out`
fn fix_tree<W: Write>(args: &FixArgs, out: &mut W) -> Result<FixReport> {
    let title = if args.dry_run {
        "Rewriting API URLs (dry run)"
    } else {
        "Rewriting API URLs"
    };
    output::print_header(title);

    let rule = build_rule(&args.rule, args.import_fallback)?;
    let files = build_collector(&args.target).collect()?;
    let mut report = FixReport::default();

    if files.is_empty() {
        output::print_warning(&format!(
            "No candidate files under {}",
            args.target.root.display()
        ));
        write_total(out, &report, args.dry_run)?;
        return Ok(report);
    }

    output::print_info(&format!(
        "Scanning {} files for '{}'",
        files.len(),
        rule.marker()
    ));

    if args.verbose {
        output::print_info(&format!("Helper import: {}", rule.import_line()));
    }

    let runner = BatchRunner::new(&rule).dry_run(args.dry_run);
    let mut write_error: Option<io::Error> = None;

    let result = runner.run(&files, &mut report, |result| match result {
        ProcessResult::Fixed(path) => {
            if write_error.is_none() {
                let line = output::format_fixed(&file_name(path), args.dry_run);
                write_error = writeln!(out, "{}", line).err();
            }
        }
        ProcessResult::Unchanged(path) if args.verbose => output::print_warning(&format!(
            "{}: contains '{}' but no rewritable URL",
            file_name(path),
            rule.marker()
        )),
        ProcessResult::Skipped(path) if args.verbose => output::print_skip(&file_name(path)),
        _ => {}
    });

    if let Err(e) = result {
        let line = output::format_aborted(report.fixed_count(), report.total(), files.len());
        writeln!(out, "{}", line).map_err(UrlfixError::OutputError)?;
        return Err(e);
    }

    if let Some(e) = write_error {
        return Err(UrlfixError::OutputError(e));
    }

    write_total(out, &report, args.dry_run)?;

    if args.verbose {
        output::print_info(&format!(
            "{} skipped, {} unchanged",
            report.skipped, report.unchanged
        ));
    }

    Ok(report)
}

fn write_total<W: Write>(out: &mut W, report: &FixReport, dry_run: bool) -> Result<()> {
    writeln!(out, "\n{}", output::format_total(report.fixed_count(), dry_run))
        .map_err(UrlfixError::OutputError)
}
