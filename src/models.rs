//! Data models for scraped news articles.

use serde::{Deserialize, Serialize};

/// Sentinel recorded when a listing entry carries no publication date.
///
/// Every persisted record has a `published_date` column; entries whose date
/// could not be derived hold this value instead of an empty field.
pub const DATE_UNKNOWN: &str = "不明";

/// A single article entry extracted from a category listing page.
///
/// Serialized to CSV in field order: `title`, `link`, `published_date`.
/// Candidates without a title or link are discarded before an `Article` is
/// ever constructed, so both are always non-empty.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Absolute URL of the article.
    pub link: String,
    /// Publication timestamp as `YYYY-MM-DD HH:MM:SS`, or [`DATE_UNKNOWN`]
    /// when the listing had no date element.
    pub published_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_creation() {
        let article = Article {
            title: "強盗事件発生".to_string(),
            link: "https://news.livedoor.com/article/detail/1/".to_string(),
            published_date: "2024-01-05 09:30:00".to_string(),
        };
        assert_eq!(article.title, "強盗事件発生");
        assert!(article.link.starts_with("https://"));
    }

    #[test]
    fn test_article_csv_column_order() {
        let article = Article {
            title: "天気予報".to_string(),
            link: "https://news.livedoor.com/article/detail/2/".to_string(),
            published_date: DATE_UNKNOWN.to_string(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&article).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("title,link,published_date"));
        assert_eq!(
            lines.next(),
            Some("天気予報,https://news.livedoor.com/article/detail/2/,不明")
        );
    }

    #[test]
    fn test_article_csv_round_trip() {
        let article = Article {
            title: "詐欺被害者増加".to_string(),
            link: "https://news.livedoor.com/article/detail/3/".to_string(),
            published_date: "2024-02-01 12:00:00".to_string(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&article).unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let parsed: Article = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed, article);
    }
}
