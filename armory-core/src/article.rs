//! Raw article records downloaded for confirmed links

use serde::{Deserialize, Serialize};

/// Text and category metadata of one confirmed weapon article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Display name derived from the URL (e.g. `Mere (weapon)`)
    pub name: String,
    /// Article path (e.g. `/wiki/Mere_(weapon)`)
    pub url: String,
    /// Paragraph text of the main content, joined by spaces
    pub text: String,
    /// Categories in page order
    pub categories: Vec<String>,
}

impl RawArticle {
    /// Categories as one comma separated string, in source order
    pub fn categories_line(&self) -> String {
        self.categories.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_line_keeps_order() {
        let article = RawArticle {
            name: "Falchion".to_string(),
            url: "/wiki/Falchion".to_string(),
            text: "A falchion is a sword.".to_string(),
            categories: vec!["Swords".to_string(), "Medieval weapons".to_string()],
        };
        assert_eq!(article.categories_line(), "Swords,Medieval weapons");
    }

    #[test]
    fn test_article_json_shape() {
        let json = r#"{"name":"Jian","url":"/wiki/Jian","text":"A sword.","categories":["Chinese swords"]}"#;
        let article: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.name, "Jian");
        assert_eq!(article.categories, vec!["Chinese swords".to_string()]);
    }
}
