//! # urlfix - 前端 API 地址批量改写工具
//!
//! 将源码中硬编码的 `http://localhost:5000/api` 改写为共享 helper
//! `getApiBaseUrl()` 调用，并在缺少 import 时补上。
//!
//! ## 子命令
//! - `fix`  - 就地改写（支持 `--dry-run`）
//! - `scan` - 只读扫描并统计
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件收集与顺序改写)
//!   │     └── rewrite/   (重写规则)
//!   ├── utils/      (输出与进度条)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod rewrite;
mod utils;

use clap::Parser;
use cli::Cli;
use std::error::Error;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        let mut msg = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        utils::output::print_error(&msg);
        std::process::exit(1);
    }
}
