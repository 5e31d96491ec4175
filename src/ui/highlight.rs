use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines, highlighting::ThemeSet, parsing::SyntaxSet, util::LinesWithEndings,
};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const THEME: &str = "base16-mocha.dark";

/// Highlights `content` using the syntax registered for `filetype`, falling
/// back to plain text for unknown extensions.
pub fn highlight(content: &str, filetype: &str, background: Color) -> Vec<Line<'static>> {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension(filetype)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let Some(theme) = THEME_SET.themes.get(THEME) else {
        return plain(content);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    LinesWithEndings::from(content)
        .map(|line| {
            let regions = highlighter
                .highlight_line(line, &SYNTAX_SET)
                .unwrap_or_default();

            let spans: Vec<Span> = regions
                .into_iter()
                .map(|(style, text)| {
                    let fg = style.foreground;
                    Span::styled(
                        text.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default()
                            .fg(Color::Rgb(fg.r, fg.g, fg.b))
                            .bg(background),
                    )
                })
                .collect();

            Line::from(spans)
        })
        .collect()
}

pub fn plain(content: &str) -> Vec<Line<'static>> {
    content.lines().map(|line| Line::from(line.to_string())).collect()
}
