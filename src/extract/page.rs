use url::Url;

use crate::dom::parser::parse_fragment;
use crate::error::{Result, TrackerError};
use crate::extract::optional_id;

/// Name and id shown on a location or pet page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    pub id: Option<u32>,
    pub name: String,
}

/// Read the page title: the first text node of the `.center.sliding`
/// navbar element, trimmed. Anything after it (counters, buttons) is ignored.
pub fn parse_page_title(content: &str, url: &Url) -> Result<PageTitle> {
    let doc = parse_fragment(content);
    let title = doc
        .first_with_classes(&["center", "sliding"])
        .ok_or_else(|| TrackerError::malformed(format!("no page title in {}", url)))?;
    let name = title
        .children
        .first()
        .filter(|c| !c.is_element())
        .map(|c| c.text.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| TrackerError::malformed(format!("empty page title in {}", url)))?;
    Ok(PageTitle {
        id: optional_id(url),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_text_node() {
        let page = r#"<div class="navbar"><div class="navbar-inner">
            <div class="center sliding">Forest <span class="badge">12</span></div>
        </div></div><div class="page-content">...</div>"#;
        let url = Url::parse("https://farmrpg.com/area.php?id=7").unwrap();
        let title = parse_page_title(page, &url).unwrap();
        assert_eq!(title.name, "Forest");
        assert_eq!(title.id, Some(7));
    }

    #[test]
    fn missing_title_is_malformed() {
        let url = Url::parse("https://farmrpg.com/area.php?id=7").unwrap();
        assert!(parse_page_title("<div class='center'>Forest</div>", &url).is_err());
        assert!(parse_page_title("<div class='center sliding'><b>Forest</b></div>", &url).is_err());
    }
}
