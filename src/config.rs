//! Pipeline configuration.
//!
//! All scrape and analysis parameters are fixed for the production pipeline
//! and carried by [`PipelineConfig::default`]. The collector and analyzer
//! entry points take a config explicitly so tests can inject small page
//! bounds and short keyword lists.

use std::time::Duration;

/// Parameters for one collect-and-analyze run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Topic categories queried independently, in order.
    pub categories: Vec<String>,
    /// Listing pages fetched per category, starting at page 1.
    pub pages_per_category: u32,
    /// Hard ceiling on how long a single page fetch may block.
    pub request_timeout: Duration,
    /// Identifying header sent with every request.
    pub user_agent: String,
    /// Site origin; prepended to relative article links and used to build
    /// listing URLs.
    pub site_origin: String,
    /// `chrono` format of the listing timestamps as published by the site.
    pub source_date_format: String,
    /// Keywords tallied against article titles, in display order.
    pub keywords: Vec<String>,
}

impl PipelineConfig {
    /// Listing URL for one page of a category.
    pub fn listing_url(&self, category: &str, page: u32) -> String {
        format!(
            "{}/topics/category/{}/?p={}",
            self.site_origin, category, page
        )
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            categories: vec!["eco".into(), "dom".into(), "world".into()],
            pages_per_category: 8,
            request_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0".into(),
            site_origin: "https://news.livedoor.com".into(),
            source_date_format: "%Y年%m月%d日 %H時%M分".into(),
            keywords: [
                "事件",
                "犯罪",
                "窃盗",
                "暴行",
                "詐欺",
                "闇バイト",
                "殺人",
                "死亡",
                "強盗",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.categories, vec!["eco", "dom", "world"]);
        assert_eq!(config.pages_per_category, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.site_origin, "https://news.livedoor.com");
        assert_eq!(config.keywords.len(), 9);
        assert_eq!(config.keywords[0], "事件");
    }

    #[test]
    fn test_listing_url() {
        let config = PipelineConfig::default();

        assert_eq!(
            config.listing_url("eco", 1),
            "https://news.livedoor.com/topics/category/eco/?p=1"
        );
        assert_eq!(
            config.listing_url("world", 8),
            "https://news.livedoor.com/topics/category/world/?p=8"
        );
    }
}
