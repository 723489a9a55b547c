//! Category listing collector.
//!
//! Walks the configured news categories page by page, extracts article
//! entries from each listing, and persists the accumulated records to a
//! timestamped CSV file.
//!
//! # Listing Structure
//!
//! A listing entry is an `<a href>` element wrapping an `<h3>` headline and,
//! usually, a `<time class="articleListDate">` timestamp:
//!
//! ```html
//! <a href="/article/detail/12345/">
//!   <h3>見出し</h3>
//!   <time class="articleListDate">2024年01月05日 09時30分</time>
//! </a>
//! ```
//!
//! Not every link on a page is an article, so candidates missing a headline
//! or href are discarded silently.
//!
//! # Failure Containment
//!
//! Failures are contained at the smallest unit of work: a page fetch that
//! times out or returns an HTTP error is logged and skipped, and a single
//! candidate that cannot be extracted never aborts its page. The run always
//! completes and always writes an output file, possibly with fewer records
//! than expected.

use crate::config::PipelineConfig;
use crate::models::{Article, DATE_UNKNOWN};
use chrono::{Local, NaiveDateTime};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};
use url::Url;

/// Outcome of extracting one candidate link element.
enum Candidate {
    /// A complete article entry.
    Article(Article),
    /// Not an article entry (missing headline or href); discarded silently.
    NotAnArticle,
    /// Extraction failed; logged with page context by the caller.
    Failed(String),
}

/// Everything extracted from one listing page.
struct PageExtraction {
    /// Number of candidate link elements found, before filtering.
    candidates: usize,
    articles: Vec<Article>,
    failures: Vec<String>,
}

/// Scrape every configured category and write the accumulated articles to a
/// timestamped CSV file under `output_dir`.
///
/// Pages are fetched strictly sequentially, one request in flight at a time.
/// Network and parse failures are per-page or per-candidate and non-fatal;
/// the run always produces an output file. Returns the path of the CSV.
#[instrument(level = "info", skip_all)]
pub async fn collect_news(
    config: &PipelineConfig,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .build()?;
    let origin = Url::parse(&config.site_origin)?;

    let mut all_articles: Vec<Article> = Vec::new();

    for category in &config.categories {
        let mut category_articles: Vec<Article> = Vec::new();

        for page in 1..=config.pages_per_category {
            let url = config.listing_url(category, page);
            info!(%url, "Fetching listing page");

            let body = match fetch_page(&client, &url).await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => {
                    warn!(%category, page, %url, "Request timed out; skipping page");
                    continue;
                }
                Err(e) => {
                    error!(%category, page, %url, error = %e, "Request failed; skipping page");
                    continue;
                }
            };

            let extraction = extract_page(&body, &origin, &config.source_date_format);
            if extraction.candidates == 0 {
                info!(%category, page, %url, "No articles found for this page");
                continue;
            }
            for failure in &extraction.failures {
                error!(%category, page, %url, error = %failure, "Failed to extract candidate; skipping it");
            }
            category_articles.extend(extraction.articles);
        }

        info!(%category, count = category_articles.len(), "Category collected");
        all_articles.append(&mut category_articles);
    }

    let path = write_csv(&all_articles, output_dir)?;
    info!(
        count = all_articles.len(),
        path = %path.display(),
        finished_at = %Local::now().format("%Y-%m-%d %H:%M:%S"),
        "CSV output complete"
    );

    Ok(path)
}

/// Fetch one listing page, treating non-2xx statuses as errors.
async fn fetch_page(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

/// Parse a listing page body and extract every article entry from it.
fn extract_page(body: &str, origin: &Url, date_format: &str) -> PageExtraction {
    let document = Html::parse_document(body);
    let link_selector = Selector::parse("a").unwrap();
    let heading_selector = Selector::parse("h3").unwrap();
    let date_selector = Selector::parse("time.articleListDate").unwrap();

    let mut extraction = PageExtraction {
        candidates: 0,
        articles: Vec::new(),
        failures: Vec::new(),
    };

    for element in document.select(&link_selector) {
        extraction.candidates += 1;
        match extract_candidate(element, &heading_selector, &date_selector, origin, date_format) {
            Candidate::Article(article) => extraction.articles.push(article),
            Candidate::NotAnArticle => {}
            Candidate::Failed(reason) => extraction.failures.push(reason),
        }
    }

    extraction
}

/// Extract one candidate link element into an [`Article`], if it is one.
///
/// Candidates without a headline, without an href, or with an empty headline
/// are not articles. A date element is optional; when present but
/// unparseable, the record still gets the unknown sentinel.
fn extract_candidate(
    element: ElementRef<'_>,
    heading_selector: &Selector,
    date_selector: &Selector,
    origin: &Url,
    date_format: &str,
) -> Candidate {
    let Some(href) = element.value().attr("href") else {
        return Candidate::NotAnArticle;
    };
    let Some(heading) = element.select(heading_selector).next() else {
        return Candidate::NotAnArticle;
    };

    let title = heading.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        return Candidate::NotAnArticle;
    }

    let published_date = match element.select(date_selector).next() {
        Some(time_tag) => {
            let raw = time_tag.text().collect::<String>();
            normalize_date(raw.trim(), date_format)
        }
        None => DATE_UNKNOWN.to_string(),
    };

    // Relative links get the site origin prepended, exactly once.
    let link = if href.starts_with("http") {
        href.to_string()
    } else {
        match origin.join(href) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => return Candidate::Failed(format!("cannot resolve href {href:?}: {e}")),
        }
    };

    Candidate::Article(Article {
        title,
        link,
        published_date,
    })
}

/// Normalize a listing timestamp like `2024年01月05日 09時30分` to the
/// sortable `YYYY-MM-DD HH:MM:SS` form. Unparseable input yields the
/// unknown sentinel.
fn normalize_date(raw: &str, format: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, format) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(e) => {
            warn!(%raw, error = %e, "Failed to parse listing date; recording unknown");
            DATE_UNKNOWN.to_string()
        }
    }
}

/// Write the accumulated articles to `news_title_<timestamp>.csv` under
/// `output_dir`. The header row is written even when there are no records.
fn write_csv(articles: &[Article], output_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("news_title_{timestamp}.csv"));

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    writer.write_record(["title", "link", "published_date"])?;
    for article in articles {
        writer.serialize(article)?;
    }
    writer.flush()?;

    Ok(path)
}
