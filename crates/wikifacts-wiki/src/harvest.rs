//! Harvesting article links from ranking report pages

use crate::mediawiki::USER_AGENT;
use crate::WikiError;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::info;

/// Extract article links from the first `table.wikitable` of a page
///
/// A cell contributes its link only when it holds exactly one anchor, and
/// links to `File:` pages are skipped. Document order is preserved.
pub fn harvest_links(html: &str) -> Result<Vec<String>, WikiError> {
    let table_selector = selector("table.wikitable")?;
    let cell_selector = selector("td")?;
    let link_selector = selector("a")?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| WikiError::Html("no wikitable on page".to_string()))?;

    let links = table
        .select(&cell_selector)
        .filter_map(|cell| {
            let mut anchors = cell.select(&link_selector);
            match (anchors.next(), anchors.next()) {
                (Some(anchor), None) => anchor.value().attr("href"),
                _ => None,
            }
        })
        .filter(|href| !href.contains("File:"))
        .map(str::to_string)
        .collect();

    Ok(links)
}

fn selector(css: &str) -> Result<Selector, WikiError> {
    Selector::parse(css).map_err(|e| WikiError::Html(format!("bad selector '{}': {}", css, e)))
}

/// Fetches ranking pages and harvests their article links
#[derive(Debug, Clone)]
pub struct RankingHarvester {
    client: reqwest::Client,
}

impl RankingHarvester {
    /// Create a harvester with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, WikiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WikiError::Communication(format!("Failed to build client: {}", e)))?;
        Ok(Self { client })
    }

    /// Fetch `url` and harvest the links of its ranking table
    pub async fn harvest(&self, url: &str) -> Result<Vec<String>, WikiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WikiError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WikiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(WikiError::Communication(format!("HTTP {} for {}", status, url)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| WikiError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        let links = harvest_links(&html)?;
        info!("Harvested {} links from {}", links.len(), url);
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REPORT: &str = r#"
        <html><body>
        <p><a href="/wiki/Ignored_intro">intro</a></p>
        <table class="wikitable sortable">
          <tr><th>Rank</th><th>Article</th><th>Image</th></tr>
          <tr>
            <td>1</td>
            <td><a href="/wiki/Avengers:_Endgame">Avengers: Endgame</a></td>
            <td><a href="/wiki/File:Poster.jpg"><img src="x.jpg"></a></td>
          </tr>
          <tr>
            <td>2</td>
            <td><a href="/wiki/Freddie_Mercury">Freddie Mercury</a></td>
            <td><a href="/wiki/A">A</a> and <a href="/wiki/B">B</a></td>
          </tr>
        </table>
        <table class="wikitable">
          <tr><td><a href="/wiki/Second_table">no</a></td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_harvest_links() {
        let links = harvest_links(REPORT).unwrap();
        assert_eq!(links, vec!["/wiki/Avengers:_Endgame", "/wiki/Freddie_Mercury"]);
    }

    #[test]
    fn test_page_without_table() {
        let err = harvest_links("<html><body><p>empty</p></body></html>").unwrap_err();
        assert!(matches!(err, WikiError::Html(_)));
    }

    #[tokio::test]
    async fn test_harvest_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Wikipedia:2019_Top_50_Report"))
            .respond_with(ResponseTemplate::new(200).set_body_string(REPORT))
            .mount(&server)
            .await;

        let harvester = RankingHarvester::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/wiki/Wikipedia:2019_Top_50_Report", server.uri());
        let links = harvester.harvest(&url).await.unwrap();
        assert_eq!(links.len(), 2);

        let missing = format!("{}/wiki/Nope", server.uri());
        assert!(harvester.harvest(&missing).await.unwrap_err().to_string().contains("Nope"));
    }
}
