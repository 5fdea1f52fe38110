//! # scan 命令实现
//!
//! 只读扫描候选文件，统计旧地址的出现情况。
//!
//! ## 功能
//! - 收集扩展名匹配的候选文件
//! - 统计标记、两种可改写前缀和无法改写的出现次数
//! - 生成终端表格，可选 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `rewrite/`
//! - 使用 `utils/output.rs`

use super::{build_collector, build_rule};
use crate::cli::scan::ScanArgs;
use crate::error::{Result, UrlfixError};
use crate::rewrite::{ImportFallback, RewriteRule};
use crate::utils::output;

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 扫描结果行
#[derive(Debug, Clone, Serialize, Tabled)]
struct SurveyRow {
    #[tabled(rename = "File")]
    #[serde(rename = "file")]
    file: String,
    #[tabled(rename = "Markers")]
    #[serde(rename = "markers")]
    markers: usize,
    #[tabled(rename = "'...'")]
    #[serde(rename = "quoted")]
    quoted: usize,
    #[tabled(rename = "`...`")]
    #[serde(rename = "template")]
    template: usize,
    #[tabled(rename = "Unhandled")]
    #[serde(rename = "unhandled")]
    unhandled: usize,
    #[tabled(rename = "Imported")]
    #[serde(rename = "has_import")]
    has_import: bool,
}

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Scanning for hardcoded API URLs");

    let rule = build_rule(&args.rule, ImportFallback::Skip)?;
    let files = build_collector(&args.target).collect()?;

    output::print_info(&format!(
        "Checking {} files under '{}' for '{}'",
        files.len(),
        args.target.root.display(),
        rule.marker()
    ));

    let rows = survey_files(&rule, &args.target.root, &files)?;

    if rows.is_empty() {
        output::print_info("No hardcoded URLs found.");
        return Ok(());
    }

    println!("{}", Table::new(&rows));

    let unhandled: usize = rows.iter().map(|r| r.unhandled).sum();
    if unhandled > 0 {
        output::print_warning(&format!(
            "{} occurrence(s) will not be rewritten by 'fix'",
            unhandled
        ));
    }

    if let Some(ref csv_path) = args.csv {
        save_rows_csv(&rows, csv_path)?;
        output::print_info(&format!("Report saved to '{}'", csv_path.display()));
    }

    Ok(())
}

/// 统计含标记的文件
fn survey_files(rule: &RewriteRule, root: &Path, files: &[PathBuf]) -> Result<Vec<SurveyRow>> {
    let mut rows = Vec::new();

    for path in files {
        let content = fs::read_to_string(path).map_err(|e| UrlfixError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        if !rule.needs_rewrite(&content) {
            continue;
        }

        let survey = rule.survey(&content);
        let display = path.strip_prefix(root).unwrap_or(path);

        rows.push(SurveyRow {
            file: display.display().to_string(),
            markers: survey.markers,
            quoted: survey.quoted,
            template: survey.template,
            unhandled: survey.unhandled(),
            has_import: survey.has_import,
        });
    }

    Ok(rows)
}

/// 保存结果到 CSV
fn save_rows_csv(rows: &[SurveyRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush().map_err(|e| UrlfixError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
