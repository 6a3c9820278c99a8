//! Encyclopedia page parsing
//!
//! Reduces a fetched HTML page to the three regions the crawl reads: links
//! inside the main content, paragraph text and the category box.

use scraper::{Html, Selector};
use std::sync::LazyLock;

static MAIN_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#mw-content-text").unwrap());

static WIKI_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/wiki/"]"#).unwrap());

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

static CATEGORY_BOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#mw-normal-catlinks").unwrap());

static CATEGORY_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul > li").unwrap());

/// Structured view of one fetched page
///
/// `None` marks a region that was absent from the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WikiPage {
    /// Article path the page was fetched for
    pub url: String,
    /// `/wiki/` hrefs inside the main content, in document order
    pub links: Option<Vec<String>>,
    /// Text of every paragraph inside the main content
    pub paragraphs: Option<Vec<String>>,
    /// Entries of the category box, in page order
    pub categories: Option<Vec<String>>,
}

impl WikiPage {
    /// Parse an HTML document fetched for `url`
    pub fn parse(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);

        let main = document.select(&MAIN_CONTENT).next();

        let links = main.map(|main| {
            main.select(&WIKI_ANCHOR)
                .filter_map(|a| a.value().attr("href"))
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let paragraphs = main.and_then(|main| {
            let texts: Vec<String> = main
                .select(&PARAGRAPH)
                .map(|p| p.text().collect::<String>())
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts)
            }
        });

        let categories = document.select(&CATEGORY_BOX).next().map(|catbox| {
            catbox
                .select(&CATEGORY_ITEM)
                .map(|li| li.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        });

        Self {
            url: url.to_string(),
            links,
            paragraphs,
            categories,
        }
    }

    /// Paragraph text joined by spaces, `None` if the page has no paragraphs
    pub fn article_text(&self) -> Option<String> {
        self.paragraphs.as_ref().map(|p| p.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
        <body>
            <div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
            <div id="content">
                <div id="mw-content-text">
                    <p>The <a href="/wiki/Falchion">falchion</a> is a one-handed sword.</p>
                    <p>It was used in <a href="/wiki/Europe">Europe</a>.</p>
                    <a href="https://example.com/wiki/External">external</a>
                    <a href="/w/index.php?title=Falchion">edit</a>
                </div>
                <div id="catlinks">
                    <div id="mw-normal-catlinks">
                        <a href="/wiki/Help:Category">Categories</a>:
                        <ul><li><a href="/wiki/Category:Swords">Swords</a></li><li>Medieval weapons</li></ul>
                    </div>
                </div>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_links_scoped_to_main_content() {
        let page = WikiPage::parse("/wiki/Falchion", PAGE);
        let links = page.links.unwrap();
        assert_eq!(links, vec!["/wiki/Falchion", "/wiki/Europe"]);
    }

    #[test]
    fn test_paragraphs_and_text() {
        let page = WikiPage::parse("/wiki/Falchion", PAGE);
        assert_eq!(page.paragraphs.as_ref().unwrap().len(), 2);
        let text = page.article_text().unwrap();
        assert!(text.starts_with("The falchion is a one-handed sword."));
        assert!(text.contains("used in Europe."));
    }

    #[test]
    fn test_categories_in_order() {
        let page = WikiPage::parse("/wiki/Falchion", PAGE);
        assert_eq!(
            page.categories.unwrap(),
            vec!["Swords".to_string(), "Medieval weapons".to_string()]
        );
    }

    #[test]
    fn test_missing_regions() {
        let page = WikiPage::parse("/wiki/Nothing", "<html><body><p>stray</p></body></html>");
        assert_eq!(page.links, None);
        assert_eq!(page.paragraphs, None);
        assert_eq!(page.categories, None);
        assert_eq!(page.article_text(), None);
    }
}
