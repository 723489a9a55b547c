//! Keyword frequency analysis and chart rendering.
//!
//! Reads a collector CSV, counts how many article titles contain each
//! configured crime keyword as a literal substring, prints the tally to
//! stdout, and renders an annotated bar chart PNG.
//!
//! Keywords are matched case-sensitively and independently: a title matching
//! both `事件` and `殺人` contributes to both counts.

use crate::config::PipelineConfig;
use crate::models::Article;
use chrono::Local;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Bar fill, matching the site's sky blue.
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Load a collector CSV, print the per-keyword tally, and save the bar chart
/// as `crime_trends_<timestamp>.png` under `output_dir`.
///
/// A missing or malformed input file is fatal and propagates to the caller.
/// Returns the path of the chart image.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn analyze_news(
    config: &PipelineConfig,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let articles = load_articles(input)?;
    info!(count = articles.len(), "Loaded collector output");

    let counts = count_keywords(&articles, &config.keywords);

    println!("キーワードごとの件数");
    for (keyword, count) in config.keywords.iter().zip(&counts) {
        println!("{keyword}: {count}件");
    }

    let chart_path = render_chart(&config.keywords, &counts, output_dir)?;
    info!(path = %chart_path.display(), "Saved keyword chart");

    Ok(chart_path)
}

/// Deserialize every row of a collector CSV. Rows are matched to [`Article`]
/// fields by header name, so a file missing the expected columns fails here.
fn load_articles(path: &Path) -> Result<Vec<Article>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut articles = Vec::new();
    for record in reader.deserialize() {
        let article: Article = record?;
        articles.push(article);
    }
    Ok(articles)
}

/// Count how many titles contain each keyword as a literal substring.
///
/// Returns counts parallel to `keywords`. Each keyword is counted
/// independently, so a title may contribute to several keywords.
fn count_keywords(articles: &[Article], keywords: &[String]) -> Vec<usize> {
    keywords
        .iter()
        .map(|keyword| {
            articles
                .iter()
                .filter(|article| article.title.contains(keyword.as_str()))
                .count()
        })
        .collect()
}

/// Render the keyword counts as a vertical bar chart with the count printed
/// above each bar, and save it as a timestamped PNG under `output_dir`.
fn render_chart(
    keywords: &[String],
    counts: &[usize],
    output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("crime_trends_{timestamp}.png"));

    // Headroom above the tallest bar so its annotation stays inside the plot.
    let y_top = {
        let max = counts.iter().copied().max().unwrap_or(0);
        max + max / 10 + 1
    };

    let root = BitMapBackend::new(&path, (960, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("犯罪種類ごとのニュース件数", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(60)
        .build_cartesian_2d((0..keywords.len()).into_segmented(), 0..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("犯罪の種類")
        .y_desc("件数")
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                keywords.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .x_label_style(
            ("sans-serif", 16)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0),
                (SegmentValue::Exact(i + 1), count),
            ],
            BAR_COLOR.filled(),
        )
    }))?;

    let annotation_style = TextStyle::from(("sans-serif", 16).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        Text::new(
            count.to_string(),
            (SegmentValue::CenterOf(i), count),
            annotation_style.clone(),
        )
    }))?;

    root.present()?;
    drop(chart);
    drop(root);

    Ok(path)
}
