//! # 重写规则
//!
//! 纯文本变换：不解析 JS 语法，只做字面前缀匹配。
//!
//! ## 规则
//! - `'http://localhost:5000/api/` -> `getApiBaseUrl() + '/`
//! - `` `http://localhost:5000/api/ `` -> `` `${getApiBaseUrl()}/ ``
//! - 缺少 import 时，在 `import axios from 'axios';` 之前插入 helper import
//!
//! 锚点若出现在注释或字符串里，插入结果同样会落在那里。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/scan.rs` 使用
//! - 使用 `regex` crate

use crate::error::{Result, UrlfixError};

use clap::ValueEnum;
use regex::{NoExpand, Regex};

/// 默认的旧 API 地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
/// 默认 helper 函数名
pub const DEFAULT_HELPER: &str = "getApiBaseUrl";
/// 旧版 helper 别名
pub const LEGACY_ALIAS: &str = "getApiUrl";
/// helper 所在模块
pub const DEFAULT_IMPORT_PATH: &str = "../../utils/api";
/// import 插入锚点
pub const DEFAULT_ANCHOR: &str = "import axios from 'axios';";

/// 找不到锚点时的处理方式
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ImportFallback {
    /// Leave the file without a helper import
    #[default]
    Skip,
    /// Insert the helper import as the first line
    Top,
}

/// 规则配置
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub base_url: String,
    pub helper: String,
    pub aliases: Vec<String>,
    pub import_path: String,
    pub anchor: String,
    pub fallback: ImportFallback,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            helper: DEFAULT_HELPER.to_string(),
            aliases: vec![LEGACY_ALIAS.to_string()],
            import_path: DEFAULT_IMPORT_PATH.to_string(),
            anchor: DEFAULT_ANCHOR.to_string(),
            fallback: ImportFallback::Skip,
        }
    }
}

/// 单个文件的扫描统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    /// 标记子串出现次数
    pub markers: usize,
    /// 单引号前缀匹配数
    pub quoted: usize,
    /// 模板字符串前缀匹配数
    pub template: usize,
    /// 已包含 helper import
    pub has_import: bool,
}

impl Survey {
    /// 规则无法改写的标记数量（双引号、其他路径等）
    pub fn unhandled(&self) -> usize {
        self.markers.saturating_sub(self.quoted + self.template)
    }
}

/// 编译好的重写规则
#[derive(Debug, Clone)]
pub struct RewriteRule {
    marker: String,
    helper: String,
    aliases: Vec<String>,
    anchor: String,
    import_line: String,
    fallback: ImportFallback,
    quoted: Regex,
    template: Regex,
    quoted_replacement: String,
    template_replacement: String,
}

impl RewriteRule {
    /// 根据配置构建规则
    pub fn new(config: RuleConfig) -> Result<Self> {
        let base = config.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(UrlfixError::InvalidArgument(
                "base URL must not be empty".to_string(),
            ));
        }
        if config.helper.trim().is_empty() {
            return Err(UrlfixError::InvalidArgument(
                "helper name must not be empty".to_string(),
            ));
        }

        let marker = host_marker(base).ok_or_else(|| {
            UrlfixError::InvalidArgument(format!("Cannot find host in base URL '{}'", base))
        })?;

        let quoted = compile(&format!("'{}/", base))?;
        let template = compile(&format!("`{}/", base))?;

        Ok(Self {
            marker: marker.to_string(),
            import_line: format!(
                "import {{ {} }} from '{}';",
                config.helper, config.import_path
            ),
            quoted_replacement: format!("{}() + '/", config.helper),
            template_replacement: format!("`${{{}()}}/", config.helper),
            helper: config.helper,
            aliases: config
                .aliases
                .into_iter()
                .filter(|a| !a.trim().is_empty())
                .collect(),
            anchor: config.anchor,
            fallback: config.fallback,
            quoted,
            template,
        })
    }

    /// 标记子串（host:port）
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// 要插入的 import 行
    pub fn import_line(&self) -> &str {
        &self.import_line
    }

    /// 是否包含旧地址标记
    pub fn needs_rewrite(&self, content: &str) -> bool {
        content.contains(&self.marker)
    }

    /// 是否已引用 helper 或其别名
    pub fn has_import(&self, content: &str) -> bool {
        content.contains(&self.helper) || self.aliases.iter().any(|a| content.contains(a.as_str()))
    }

    /// 在锚点前插入 helper import
    pub fn insert_import(&self, content: &str) -> String {
        if self.has_import(content) {
            return content.to_string();
        }

        let eol = line_ending(content);

        if content.contains(&self.anchor) {
            // 与 str::replace 一致：每个锚点前都会插入
            let with_import = format!("{}{}{}", self.import_line, eol, self.anchor);
            return content.replace(&self.anchor, &with_import);
        }

        match self.fallback {
            ImportFallback::Skip => content.to_string(),
            ImportFallback::Top => format!("{}{}{}", self.import_line, eol, content),
        }
    }

    /// 替换两种 URL 前缀
    pub fn rewrite_urls(&self, content: &str) -> String {
        let content = self
            .quoted
            .replace_all(content, NoExpand(&self.quoted_replacement));
        self.template
            .replace_all(&content, NoExpand(&self.template_replacement))
            .into_owned()
    }

    /// 完整变换；不含标记时返回 `None`
    pub fn apply(&self, content: &str) -> Option<String> {
        if !self.needs_rewrite(content) {
            return None;
        }
        let content = self.insert_import(content);
        Some(self.rewrite_urls(&content))
    }

    /// 统计文件中的匹配情况
    pub fn survey(&self, content: &str) -> Survey {
        Survey {
            markers: content.matches(self.marker.as_str()).count(),
            quoted: self.quoted.find_iter(content).count(),
            template: self.template.find_iter(content).count(),
            has_import: self.has_import(content),
        }
    }
}

/// 沿用文件原有的换行符
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// 从 URL 中取出 host:port
fn host_marker(base: &str) -> Option<&str> {
    let rest = match base.find("://") {
        Some(idx) => &base[idx + 3..],
        None => base,
    };
    rest.split('/').next().filter(|h| !h.is_empty())
}

fn compile(literal: &str) -> Result<Regex> {
    Regex::new(&regex::escape(literal)).map_err(|e| UrlfixError::InvalidPattern {
        pattern: literal.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RewriteRule {
        RewriteRule::new(RuleConfig::default()).unwrap()
    }

    #[test]
    fn test_marker_from_base_url() {
        assert_eq!(rule().marker(), "localhost:5000");
        assert_eq!(host_marker("https://example.com:8443/v1"), Some("example.com:8443"));
        assert_eq!(host_marker("http:///api"), None);
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = RuleConfig {
            base_url: "  ".to_string(),
            ..RuleConfig::default()
        };
        assert!(matches!(
            RewriteRule::new(config),
            Err(UrlfixError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_quoted_literal() {
        let out = rule().rewrite_urls("axios.get('http://localhost:5000/api/users')");
        assert_eq!(out, "axios.get(getApiBaseUrl() + '/users')");
    }

    #[test]
    fn test_template_literal() {
        let out = rule().rewrite_urls("axios.get(`http://localhost:5000/api/users/${id}`)");
        assert_eq!(out, "axios.get(`${getApiBaseUrl()}/users/${id}`)");
    }

    #[test]
    fn test_rewrite_is_global() {
        let content = "a('http://localhost:5000/api/x');\nb('http://localhost:5000/api/y');\n\
                       c(`http://localhost:5000/api/z/${i}`);\nd(`http://localhost:5000/api/w`);\n";
        let out = rule().rewrite_urls(content);
        assert!(!out.contains("localhost:5000"));
        assert_eq!(out.matches("getApiBaseUrl() + '/").count(), 2);
        assert_eq!(out.matches("`${getApiBaseUrl()}/").count(), 2);
    }

    #[test]
    fn test_rewrite_idempotent() {
        let r = rule();
        let content = "const a = 'http://localhost:5000/api/a';\n\
                       const b = `http://localhost:5000/api/b/${x}`;\n\
                       const c = \"http://localhost:5000/api/c\";\n";
        let once = r.rewrite_urls(content);
        assert_eq!(r.rewrite_urls(&once), once);
    }

    #[test]
    fn test_unrecognized_forms_untouched() {
        let r = rule();
        for s in [
            "\"http://localhost:5000/api/users\"",
            "'https://localhost:5000/api/users'",
            "'http://localhost:5001/api/users'",
            "'http://localhost:5000/apiv2/users'",
            "'http://localhost:5000/api'",
        ] {
            assert_eq!(r.rewrite_urls(s), s);
        }
    }

    #[test]
    fn test_has_import() {
        let r = rule();
        assert!(r.has_import("import { getApiBaseUrl } from '../utils/api';"));
        assert!(r.has_import("const u = getApiUrl('/x');"));
        assert!(!r.has_import("import axios from 'axios';"));
    }

    #[test]
    fn test_insert_import_before_anchor() {
        let out = rule().insert_import("import React from 'react';\nimport axios from 'axios';\n");
        assert_eq!(
            out,
            "import React from 'react';\nimport { getApiBaseUrl } from '../../utils/api';\nimport axios from 'axios';\n"
        );
    }

    #[test]
    fn test_insert_import_skips_existing() {
        let r = rule();
        for content in [
            "import axios from 'axios';\nimport { getApiBaseUrl } from './api';\n",
            "import axios from 'axios';\nimport { getApiUrl } from './api';\n",
        ] {
            assert_eq!(r.insert_import(content), content);
        }
    }

    #[test]
    fn test_insert_import_requires_exact_anchor() {
        let r = rule();
        for content in [
            "import axios from \"axios\";\n",
            "import axios from 'axios'\n",
            "const x = 1;\n",
        ] {
            assert_eq!(r.insert_import(content), content);
        }
    }

    #[test]
    fn test_insert_import_top_fallback() {
        let config = RuleConfig {
            fallback: ImportFallback::Top,
            ..RuleConfig::default()
        };
        let r = RewriteRule::new(config).unwrap();
        assert_eq!(
            r.insert_import("const x = 1;\n"),
            "import { getApiBaseUrl } from '../../utils/api';\nconst x = 1;\n"
        );
        // 有锚点时仍按锚点插入
        assert_eq!(
            r.insert_import("import axios from 'axios';\n"),
            "import { getApiBaseUrl } from '../../utils/api';\nimport axios from 'axios';\n"
        );
    }

    #[test]
    fn test_apply_end_to_end() {
        let content = "import axios from 'axios';\nconst url = 'http://localhost:5000/api/login';\n";
        let out = rule().apply(content).unwrap();
        assert_eq!(
            out,
            "import { getApiBaseUrl } from '../../utils/api';\nimport axios from 'axios';\nconst url = getApiBaseUrl() + '/login';\n"
        );
    }

    #[test]
    fn test_apply_keeps_crlf_line_endings() {
        let content = "import axios from 'axios';\r\nconst url = 'http://localhost:5000/api/login';\r\n";
        let out = rule().apply(content).unwrap();
        assert_eq!(
            out,
            "import { getApiBaseUrl } from '../../utils/api';\r\nimport axios from 'axios';\r\nconst url = getApiBaseUrl() + '/login';\r\n"
        );
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn test_top_fallback_keeps_crlf_line_endings() {
        let config = RuleConfig {
            fallback: ImportFallback::Top,
            ..RuleConfig::default()
        };
        let r = RewriteRule::new(config).unwrap();
        assert_eq!(
            r.insert_import("const x = 1;\r\n"),
            "import { getApiBaseUrl } from '../../utils/api';\r\nconst x = 1;\r\n"
        );
    }

    #[test]
    fn test_apply_without_marker() {
        assert_eq!(rule().apply("import axios from 'axios';\nfetch('/api/x');\n"), None);
    }

    #[test]
    fn test_apply_double_quoted_only_is_unchanged() {
        let content = "const url = \"http://localhost:5000/api/login\";\n";
        assert_eq!(rule().apply(content).as_deref(), Some(content));
    }

    #[test]
    fn test_custom_helper_and_base() {
        let config = RuleConfig {
            base_url: "http://127.0.0.1:8080/v1/".to_string(),
            helper: "apiRoot".to_string(),
            aliases: vec![],
            ..RuleConfig::default()
        };
        let r = RewriteRule::new(config).unwrap();
        assert_eq!(r.marker(), "127.0.0.1:8080");
        assert_eq!(
            r.rewrite_urls("x('http://127.0.0.1:8080/v1/a'); y(`http://127.0.0.1:8080/v1/b`);"),
            "x(apiRoot() + '/a'); y(`${apiRoot()}/b`);"
        );
        assert_eq!(r.import_line(), "import { apiRoot } from '../../utils/api';");
    }

    #[test]
    fn test_survey_counts() {
        let content = "import axios from 'axios';\n\
                       a('http://localhost:5000/api/a');\n\
                       b(`http://localhost:5000/api/b`);\n\
                       c(\"http://localhost:5000/api/c\");\n";
        let survey = rule().survey(content);
        assert_eq!(
            survey,
            Survey {
                markers: 3,
                quoted: 1,
                template: 1,
                has_import: false,
            }
        );
        assert_eq!(survey.unhandled(), 1);
    }
}
