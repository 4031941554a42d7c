// Interface translations.
// Static English and Chinese string tables with {{name}} interpolation.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Zh => ZH,
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("app.title", "GitHub AI Navigator"),
    ("app.subtitle", "Curated High Star Open Source Projects"),
    ("search.placeholder", "Search AI repositories..."),
    ("search.loading", "Searching for high-quality AI projects..."),
    ("search.found", "Found {{count}} related repositories"),
    ("search.limit", "Showing first 1k only"),
    ("search.ready", "Ready"),
    ("search.cached", "cached"),
    ("search.noResults", "No projects found"),
    (
        "search.noResultsHint",
        "Try changing keywords or reducing filters. We only show AI repositories with more than 1000 stars.",
    ),
    ("search.clear", "Press c to clear search criteria"),
    (
        "search.end",
        "All high-star AI repositories loaded (GitHub API limits to first 1000 results)",
    ),
    ("sort.desc", "Star Descending"),
    ("sort.asc", "Star Ascending"),
    ("error.title", "Data Fetch Error"),
    ("error.tryAgain", "Press r to try again"),
    ("error.failed", "Request Failed"),
    (
        "error.rateLimited",
        "GitHub API rate limit reached, please try again later or use a proxy.",
    ),
    ("error.network", "Failed to fetch data, please check your network."),
    ("repo.noDescription", "No description provided."),
    ("repo.updated", "Updated {{when}}"),
    ("page.indicator", "Page {{page}} / {{total}}"),
    ("language.zh", "中文"),
    ("language.en", "English"),
    ("language.changed", "Language switched to {{name}}"),
    ("hint.navigate", "Navigate"),
    ("hint.page", "Page"),
    ("hint.search", "Search"),
    ("hint.sort", "Sort"),
    ("hint.retry", "Retry"),
    ("hint.language", "Language"),
    ("hint.quit", "Quit"),
    ("hint.editing", "Enter: search now  Esc: done  Ctrl+U: clear"),
];

const ZH: &[(&str, &str)] = &[
    ("app.title", "GitHub AI 导航"),
    ("app.subtitle", "精选高 Star 开源项目"),
    ("search.placeholder", "搜索 AI 仓库..."),
    ("search.loading", "正在搜索优质 AI 项目..."),
    ("search.found", "找到 {{count}} 个相关仓库"),
    ("search.limit", "仅展示前 1k"),
    ("search.ready", "准备就绪"),
    ("search.cached", "缓存"),
    ("search.noResults", "未找到相关项目"),
    (
        "search.noResultsHint",
        "尝试更换关键词，或者减少筛选条件。我们目前仅展示 Star 数大于 1000 的 AI 仓库。",
    ),
    ("search.clear", "按 c 清除搜索条件"),
    (
        "search.end",
        "已加载全部高星 AI 仓库 (GitHub API 限制前 1000 条结果)",
    ),
    ("sort.desc", "Star 降序"),
    ("sort.asc", "Star 升序"),
    ("error.title", "数据获取异常"),
    ("error.tryAgain", "按 r 重试"),
    ("error.failed", "请求失败"),
    ("error.rateLimited", "GitHub API 限流，请稍后再试或使用代理。"),
    ("error.network", "获取数据失败，请检查网络。"),
    ("repo.noDescription", "暂无描述。"),
    ("repo.updated", "更新于 {{when}}"),
    ("page.indicator", "第 {{page}} / {{total}} 页"),
    ("language.zh", "中文"),
    ("language.en", "English"),
    ("language.changed", "语言已切换为 {{name}}"),
    ("hint.navigate", "选择"),
    ("hint.page", "翻页"),
    ("hint.search", "搜索"),
    ("hint.sort", "排序"),
    ("hint.retry", "重试"),
    ("hint.language", "语言"),
    ("hint.quit", "退出"),
    ("hint.editing", "Enter: 立即搜索  Esc: 完成  Ctrl+U: 清空"),
];

/// Look up `key`, falling back to the key itself.
pub fn translate(lang: Language, key: &str) -> String {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| (*text).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Look up `key` and substitute every `{{name}}` placeholder.
pub fn translate_with(lang: Language, key: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(translate(lang, key), |text, (name, value)| {
            text.replace(&format!("{{{{{}}}}}", name), value)
        })
}

/// User-facing text for a fetch failure.
pub fn fetch_error_message(lang: Language, err: &FetchError) -> String {
    match err {
        FetchError::RateLimited { .. } => translate(lang, "error.rateLimited"),
        FetchError::Network(_) => translate(lang, "error.network"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate(Language::En, "search.ready"), "Ready");
        assert_eq!(translate(Language::Zh, "search.ready"), "准备就绪");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(translate(Language::En, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_interpolation_replaces_all_occurrences() {
        assert_eq!(
            translate_with(Language::En, "search.found", &[("count", "5,000")]),
            "Found 5,000 related repositories"
        );
        assert_eq!(
            translate_with(
                Language::Zh,
                "page.indicator",
                &[("page", "2"), ("total", "42")]
            ),
            "第 2 / 42 页"
        );
    }

    #[test]
    fn test_tables_have_same_keys() {
        for (key, _) in EN {
            assert!(ZH.iter().any(|(k, _)| k == key), "missing zh key {}", key);
        }
        assert_eq!(EN.len(), ZH.len());
    }

    #[test]
    fn test_fetch_error_messages() {
        let limited = FetchError::RateLimited { status: 403 };
        assert!(fetch_error_message(Language::Zh, &limited).contains("限流"));
        let offline = FetchError::network("dns");
        assert!(fetch_error_message(Language::En, &offline).contains("network"));
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Zh.code(), "zh");
        assert_eq!(Language::default().toggle(), Language::Zh);
    }
}
