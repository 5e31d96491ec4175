//! Three-column navigator rendering.
//!
//! Nothing here keeps state between frames: the caller hands in a [`View`]
//! snapshot and a [`RenderConfig`] for every draw.

use crate::app::{DetailEntry, Focus, View};
use crate::models::{Artifact, Language, Metadata};
use crate::ui::highlight;
use crate::ui::pane::Pane;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Colors and column widths for one render call
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Width of the category column, in percent of the frame
    pub category_width: u16,
    /// Width of the snippet column, in percent of the frame
    pub snippet_width: u16,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub subtle: Color,
    pub muted: Color,
    pub border: Color,
    pub focused_border: Color,
    pub accent: Color,
    pub error: Color,
    pub date: Color,
}

impl Default for RenderConfig {
    // Rose Pine, https://rosepinetheme.com/
    fn default() -> Self {
        Self {
            category_width: 20,
            snippet_width: 25,
            background: Color::Rgb(25, 23, 36),
            surface: Color::Rgb(31, 29, 46),
            text: Color::Rgb(224, 222, 244),
            subtle: Color::Rgb(144, 140, 170),
            muted: Color::Rgb(110, 106, 134),
            border: Color::Rgb(82, 79, 103),
            focused_border: Color::Rgb(156, 207, 216),
            accent: Color::Rgb(196, 167, 231),
            error: Color::Rgb(235, 111, 146),
            date: Color::Rgb(246, 193, 119),
        }
    }
}

pub fn render(frame: &mut Frame, view: &View, config: &RenderConfig) {
    let area = frame.area();

    let block = Block::bordered()
        .title(format!(" sazed · {} ", view.root.display()))
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(config.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [columns, status] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(inner);
    let [categories, snippets, detail] = Layout::horizontal([
        Constraint::Percentage(config.category_width),
        Constraint::Percentage(config.snippet_width),
        Constraint::Fill(1),
    ])
    .areas(columns);

    render_categories(frame, categories, view, config);
    render_snippets(frame, snippets, view, config);
    render_detail(frame, detail, view, config);
    render_status(frame, status, view, config);
}

fn column_block<T>(title: String, pane: &Pane<T>, config: &RenderConfig) -> Block<'static> {
    let (border, title_style) = if pane.is_focused() {
        (
            config.focused_border,
            Style::default().fg(config.background).bg(config.accent).bold(),
        )
    } else {
        (config.border, Style::default().fg(config.accent))
    };

    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, title_style))
}

fn render_categories(frame: &mut Frame, area: Rect, view: &View, config: &RenderConfig) {
    let block = column_block(" Categories ".to_string(), view.categories, config);
    let width = block.inner(area).width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = view
        .categories
        .items()
        .iter()
        .map(|name| ListItem::new(fit(name, width)).style(Style::default().fg(config.text)))
        .collect();

    render_list(frame, area, items, block, view.categories.cursor(), config);
}

fn render_snippets(frame: &mut Frame, area: Rect, view: &View, config: &RenderConfig) {
    let title = match view.categories.selected() {
        Some(category) => format!(" {} ", category),
        None => " Snippets ".to_string(),
    };
    let block = column_block(title, view.snippets, config);
    let width = block.inner(area).width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = match view.metadata {
        Some(metadata) => metadata
            .snippets()
            .iter()
            .map(|snippet| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(fit(snippet.name(), width), Style::default().fg(config.text)),
                        Span::raw("  "),
                        Span::styled(
                            snippet.creation_date().to_string(),
                            Style::default().fg(config.date),
                        ),
                    ]),
                    Line::from(Span::styled(
                        fit(snippet.description(), width),
                        Style::default().fg(config.subtle),
                    )),
                    Line::from(""),
                ])
            })
            .collect(),
        None => Vec::new(),
    };

    if view.snippets.is_empty() {
        let message = if view.metadata.is_some() {
            "No snippets yet"
        } else {
            "Category unavailable"
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(config.muted))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    render_list(frame, area, items, block, view.snippets.cursor(), config);
}

fn render_list<'a>(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem<'a>>,
    block: Block<'a>,
    cursor: usize,
    config: &RenderConfig,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(config.accent).bg(config.surface).bold())
        .highlight_symbol("│ ");

    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail(frame: &mut Frame, area: Rect, view: &View, config: &RenderConfig) {
    let title = match (view.metadata, view.snippets.selected()) {
        (Some(metadata), Some(name)) => format!(
            " {} · {} ",
            name,
            Language::from_filetype(metadata.filetype()).display_name()
        ),
        _ => " Details ".to_string(),
    };
    let block = column_block(title, view.detail, config);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entry) = view.detail.selected() else {
        let empty = Paragraph::new("Select a snippet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(config.muted));
        frame.render_widget(empty, inner);
        return;
    };

    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let titles: Vec<&str> = view
        .detail
        .items()
        .iter()
        .map(|entry| entry.kind.label())
        .collect();
    let tabs = Tabs::new(titles)
        .select(view.detail.cursor())
        .style(Style::default().fg(config.subtle))
        .highlight_style(Style::default().fg(config.error).bold())
        .divider("│")
        .padding(" ", " ");
    frame.render_widget(tabs, tabs_area);

    let body = Paragraph::new(detail_lines(entry, view.metadata, config))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(config.text));
    frame.render_widget(body, body_area);
}

fn detail_lines(
    entry: &DetailEntry,
    metadata: Option<&Metadata>,
    config: &RenderConfig,
) -> Vec<Line<'static>> {
    if entry.body.is_empty() {
        return vec![Line::from(Span::styled(
            format!("No {} yet", entry.kind.label().to_lowercase()),
            Style::default().fg(config.muted),
        ))];
    }

    match (entry.kind, metadata) {
        (Artifact::Code | Artifact::Tests, Some(metadata)) => {
            highlight::highlight(&entry.body, metadata.filetype(), config.background)
        }
        _ => highlight::plain(&entry.body),
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &View, config: &RenderConfig) {
    let line = match view.status {
        Some(message) => Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(config.error),
        )),
        None => Line::from(vec![
            Span::styled(
                format!(" {} ", focus_label(view.focus)),
                Style::default().fg(config.background).bg(config.accent),
            ),
            Span::styled(
                " [j/k] Move │ [l/⏎] Enter │ [h/Esc] Back │ [r] Reload │ [q] Quit ",
                Style::default().fg(config.muted),
            ),
        ]),
    };

    let bar = Paragraph::new(line).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(config.border)),
    );
    frame.render_widget(bar, area);
}

fn focus_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Categories => "Categories",
        Focus::Snippets => "Snippets",
        Focus::Detail => "Details",
    }
}

/// Truncates `text` to `width` terminal columns, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn fit_truncates_by_display_width() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("日本語テキスト", 5), "日本…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn renders_all_three_columns() {
        let tmp = tempfile::tempdir().unwrap();
        let mut metadata = Metadata::load(tmp.path().join("go"), "go").unwrap();
        metadata.add_snippet("hello", "prints a greeting");
        metadata.set_code("hello", "package main").unwrap();

        let app = App::new(tmp.path()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| app.render(frame, &RenderConfig::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Categories"));
        assert!(text.contains("hello"));
        assert!(text.contains("package main"));
        assert!(text.contains("Code"));
    }
}
