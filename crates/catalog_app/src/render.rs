use std::io::{self, Write};

use catalog_core::{CatalogViewModel, DisplayEntry};
use serde::Serialize;

#[derive(Serialize)]
struct JsonPage<'a> {
    entries: &'a [DisplayEntry],
    item_count: usize,
    story_count: usize,
    is_loading: bool,
    has_more: bool,
    error: Option<&'a str>,
    story_error: Option<&'a str>,
}

pub fn render_json(view: &CatalogViewModel, out: &mut impl Write) -> anyhow::Result<()> {
    let page = JsonPage {
        entries: &view.entries,
        item_count: view.item_count,
        story_count: view.story_count,
        is_loading: view.is_loading,
        has_more: view.has_more,
        error: view.error.as_deref(),
        story_error: view.story_error.as_deref(),
    };
    serde_json::to_writer_pretty(&mut *out, &page)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_text(view: &CatalogViewModel, out: &mut impl Write) -> io::Result<()> {
    for entry in &view.entries {
        match entry {
            DisplayEntry::Item(item) => writeln!(
                out,
                "  #{:<6} {:<12} {}  {}",
                item.id,
                item.source,
                item.title_en.as_deref().unwrap_or("(untitled)"),
                item.url().unwrap_or("-")
            )?,
            DisplayEntry::Story(story) => writeln!(
                out,
                "  * story #{} {}",
                story.id,
                story.title_en.as_deref().unwrap_or("(untitled)")
            )?,
        }
    }

    let status = match (&view.error, view.has_more) {
        (Some(error), _) => format!("failed to load more items: {error}"),
        (None, true) => "more items available".to_string(),
        (None, false) => "end of the collection".to_string(),
    };
    writeln!(
        out,
        "{} items, {} stories; {}",
        view.item_count, view.story_count, status
    )?;
    if let Some(error) = &view.story_error {
        writeln!(out, "stories unavailable: {error}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Item, Story};

    fn view() -> CatalogViewModel {
        CatalogViewModel {
            entries: vec![
                DisplayEntry::Item(Item {
                    id: 12,
                    item_url: None,
                    ebay_url: Some("https://www.ebay.com/itm/12".to_string()),
                    source: "eBay".to_string(),
                    title_en: Some("Signed boot".to_string()),
                    extra: Default::default(),
                }),
                DisplayEntry::Story(Story {
                    id: 3,
                    title_en: Some("The Bicycle Kick".to_string()),
                    related_search_terms: None,
                    extra: Default::default(),
                }),
            ],
            item_count: 1,
            story_count: 1,
            has_more: false,
            ..CatalogViewModel::default()
        }
    }

    #[test]
    fn text_lists_entries_and_status() {
        let mut out = Vec::new();
        render_text(&view(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("#12"));
        assert!(text.contains("https://www.ebay.com/itm/12"));
        assert!(text.contains("story #3 The Bicycle Kick"));
        assert!(text.ends_with("1 items, 1 stories; end of the collection\n"));
    }

    #[test]
    fn json_tags_entries_by_kind() {
        let mut out = Vec::new();
        render_json(&view(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["entries"][0]["kind"], "item");
        assert_eq!(value["entries"][0]["record"]["id"], 12);
        assert_eq!(value["entries"][1]["kind"], "story");
        assert_eq!(value["has_more"], false);
    }
}
