//! Plain-text rendering of catalog pages.

use std::fmt::Write;

use manga_admin_core::{CatalogPage, MangaEntry};

const TITLE_WIDTH: usize = 32;

pub fn render_page(page: &CatalogPage, filter: Option<&str>) -> String {
    let mut out = String::new();

    if page.items.is_empty() {
        out.push_str("(没有漫画)\n");
    } else {
        let _ = writeln!(
            out,
            "{:>8}  {:<width$}  {:<16}  {:<4}  {:>5}  标签",
            "ID",
            "标题",
            "作者",
            "状态",
            "章节",
            width = TITLE_WIDTH
        );
        for entry in &page.items {
            out.push_str(&render_row(entry));
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "第 {}/{} 页，共 {} 条",
        page.page_index + 1,
        page.total_pages().max(1),
        page.total_count
    );
    if let Some(tag) = filter {
        let _ = write!(out, " (标签: {})", tag);
    }
    out
}

fn render_row(entry: &MangaEntry) -> String {
    let status = if entry.is_finished() { "完结" } else { "连载" };
    format!(
        "{:>8}  {:<width$}  {:<16}  {:<4}  {:>5}  {}",
        entry.id,
        truncate(&entry.title, TITLE_WIDTH),
        truncate(entry.author.as_deref().unwrap_or("-"), 16),
        status,
        entry.chapter_count,
        entry.tags.join(", "),
        width = TITLE_WIDTH
    )
}

/// Cut to `max` chars, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
