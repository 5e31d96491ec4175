use crate::models::fs::list_dirs;
use crate::models::{Artifact, Metadata};
use crate::ui::navigator::{self, RenderConfig};
use crate::ui::pane::Pane;
use anyhow::{Context, Result, bail};
use ratatui::Frame;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Which column receives cursor movement.
///
/// Ordered left to right. Moving past either end clamps instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Focus {
    #[default]
    Categories,
    Snippets,
    Detail,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Categories => Focus::Snippets,
            Focus::Snippets | Focus::Detail => Focus::Detail,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Categories | Focus::Snippets => Focus::Categories,
            Focus::Detail => Focus::Snippets,
        }
    }
}

/// Navigator commands, already decoded from key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move focus one column right
    Advance,
    /// Move focus one column left
    Retreat,
    /// Cursor down in the focused column
    Next,
    /// Cursor up in the focused column
    Previous,
    /// Load the selected category again, e.g. after a storage error
    Reload,
}

/// One tab of the detail column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry {
    pub kind: Artifact,
    pub body: String,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub root: &'a Path,
    pub focus: Focus,
    pub categories: &'a Pane<String>,
    pub snippets: &'a Pane<String>,
    pub detail: &'a Pane<DetailEntry>,
    pub metadata: Option<&'a Metadata>,
    pub status: Option<&'a str>,
}

/// Three-column navigator: categories, snippets of the selected category,
/// and the artifacts of the selected snippet.
#[derive(Debug)]
pub struct App {
    root: PathBuf,
    focus: Focus,
    categories: Pane<String>,
    snippets: Pane<String>,
    detail: Pane<DetailEntry>,
    metadata: Option<Metadata>,
    status: Option<String>,
}

impl App {
    /// Lists the categories under `root` and opens the first one.
    ///
    /// Fails when `root` has no category directory; the bootstrap is expected
    /// to create the default one first.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let categories = list_dirs(&root)
            .with_context(|| format!("Failed to list categories in {}", root.display()))?;
        if categories.is_empty() {
            bail!("No categories found in {}", root.display());
        }

        let mut app = Self {
            root,
            focus: Focus::Categories,
            categories: Pane::new(categories),
            snippets: Pane::default(),
            detail: Pane::default(),
            metadata: None,
            status: None,
        };
        app.categories.focus();
        app.load_selected_category();
        Ok(app)
    }

    /// Column that currently receives `Next` / `Previous`.
    pub fn current_focus(&self) -> Focus {
        self.focus
    }

    /// Applies one navigator command and returns the resulting view.
    ///
    /// Focus changes clamp at the outer columns. Cursor moves wrap inside the
    /// focused column; a new category reloads the snippet column and a new
    /// snippet reloads the detail column.
    pub fn handle_input(&mut self, input: Input) -> View<'_> {
        match input {
            Input::Advance => self.set_focus(self.focus.next()),
            Input::Retreat => self.set_focus(self.focus.previous()),
            Input::Next | Input::Previous => self.move_cursor(input == Input::Next),
            Input::Reload => self.load_selected_category(),
        }
        self.view()
    }

    /// Borrowed snapshot of the current state for rendering.
    pub fn view(&self) -> View<'_> {
        View {
            root: &self.root,
            focus: self.focus,
            categories: &self.categories,
            snippets: &self.snippets,
            detail: &self.detail,
            metadata: self.metadata.as_ref(),
            status: self.status.as_deref(),
        }
    }

    /// Draws the navigator into `frame` with the given layout and colors.
    pub fn render(&self, frame: &mut Frame, config: &RenderConfig) {
        navigator::render(frame, &self.view(), config);
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.categories.blur();
        self.snippets.blur();
        self.detail.blur();
        match focus {
            Focus::Categories => self.categories.focus(),
            Focus::Snippets => self.snippets.focus(),
            Focus::Detail => self.detail.focus(),
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        fn step<T>(pane: &mut Pane<T>, forward: bool) -> bool {
            let before = pane.cursor();
            if forward {
                pane.advance();
            } else {
                pane.retreat();
            }
            pane.cursor() != before
        }

        match self.focus {
            Focus::Categories => {
                if step(&mut self.categories, forward) {
                    self.load_selected_category();
                }
            }
            Focus::Snippets => {
                if step(&mut self.snippets, forward) {
                    self.refresh_detail();
                }
            }
            Focus::Detail => {
                step(&mut self.detail, forward);
            }
        }
    }

    /// Opens the store of the selected category and repopulates the snippet
    /// column. On failure the column is emptied and the error is kept for the
    /// status line.
    fn load_selected_category(&mut self) {
        self.status = None;
        let Some(category) = self.categories.selected().cloned() else {
            return;
        };

        // A fresh category takes its own name as file type.
        match Metadata::load(self.root.join(&category), &category) {
            Ok(metadata) => {
                debug!(category = %category, snippets = metadata.len(), "opened category");
                let names = metadata
                    .snippets()
                    .iter()
                    .map(|snippet| snippet.name().to_string())
                    .collect();
                self.snippets.set_items(names);
                self.metadata = Some(metadata);
            }
            Err(e) => {
                warn!(category = %category, kind = e.kind(), error = %e, "failed to open category");
                self.snippets.set_items(Vec::new());
                self.metadata = None;
                self.status = Some(format!("{}: {} (press r to retry)", category, e));
            }
        }

        self.refresh_detail();
    }

    /// Rebuilds the detail tabs for the selected snippet. The status line
    /// reflects the read of this snippet only.
    fn refresh_detail(&mut self) {
        let (Some(metadata), Some(name)) = (self.metadata.as_ref(), self.snippets.selected())
        else {
            self.detail.set_items(Vec::new());
            return;
        };

        let mut failure = None;
        let entries: Vec<DetailEntry> = Artifact::ALL
            .into_iter()
            .map(|kind| {
                let body = match metadata.artifact(name, kind) {
                    Ok(body) => body.unwrap_or_default(),
                    Err(e) => {
                        warn!(snippet = %name, error = %e, "failed to read artifact");
                        failure = Some(e.to_string());
                        String::new()
                    }
                };
                DetailEntry { kind, body }
            })
            .collect();

        self.detail.set_items(entries);
        self.status = failure;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn seed(root: &Path, category: &str, snippets: &[(&str, &str)]) {
        let mut metadata = Metadata::load(root.join(category), category).unwrap();
        for (name, code) in snippets {
            metadata.add_snippet(name, "desc");
            metadata.set_code(name, code).unwrap();
        }
    }

    fn snippet_names(app: &App) -> Vec<String> {
        app.view().snippets.items().to_vec()
    }

    #[test]
    fn starts_on_first_category() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[("hello", "fmt.Println()")]);
        seed(tmp.path(), "rs", &[]);

        let app = App::new(tmp.path()).unwrap();
        let view = app.view();
        assert_eq!(app.current_focus(), Focus::Categories);
        assert_eq!(view.categories.items(), ["go", "rs"]);
        assert!(view.categories.is_focused());
        assert_eq!(snippet_names(&app), ["hello"]);
        assert_eq!(view.detail.selected().unwrap().body, "fmt.Println()");
    }

    #[test]
    fn empty_root_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(App::new(tmp.path()).is_err());
    }

    #[test]
    fn focus_clamps_at_both_ends() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[]);
        let mut app = App::new(tmp.path()).unwrap();

        for _ in 0..5 {
            app.handle_input(Input::Retreat);
            assert_eq!(app.current_focus(), Focus::Categories);
        }

        app.handle_input(Input::Advance);
        assert_eq!(app.current_focus(), Focus::Snippets);
        for _ in 0..5 {
            let view = app.handle_input(Input::Advance);
            assert_eq!(view.focus, Focus::Detail);
            assert!(view.detail.is_focused());
            assert!(!view.snippets.is_focused());
        }

        app.handle_input(Input::Retreat);
        assert_eq!(app.current_focus(), Focus::Snippets);
    }

    #[test]
    fn movement_goes_to_focused_pane_only() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[("a", "1"), ("b", "2"), ("c", "3")]);
        seed(tmp.path(), "js", &[]);
        seed(tmp.path(), "rs", &[]);
        let mut app = App::new(tmp.path()).unwrap();

        app.handle_input(Input::Advance);
        app.handle_input(Input::Previous);
        let view = app.handle_input(Input::Previous);

        assert_eq!(view.categories.cursor(), 0);
        assert_eq!(view.categories.selected().unwrap(), "go");
        assert_eq!(view.snippets.cursor(), 1);
        assert_eq!(view.detail.selected().unwrap().body, "2");
    }

    #[test]
    fn category_change_replaces_snippets() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[("a", "1"), ("b", "2")]);
        seed(tmp.path(), "rs", &[("z", "fn z() {}")]);
        let mut app = App::new(tmp.path()).unwrap();

        app.handle_input(Input::Advance);
        app.handle_input(Input::Next);
        app.handle_input(Input::Retreat);
        app.handle_input(Input::Next);

        assert_eq!(snippet_names(&app), ["z"]);
        assert_eq!(app.view().snippets.cursor(), 0);
        assert_eq!(app.view().metadata.unwrap().filetype(), "rs");
        assert_eq!(app.view().detail.selected().unwrap().body, "fn z() {}");

        app.handle_input(Input::Next);
        assert_eq!(snippet_names(&app), ["a", "b"]);
    }

    #[test]
    fn detail_pane_cycles_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[("a", "code")]);
        let mut metadata = Metadata::load(tmp.path().join("go"), "go").unwrap();
        metadata.set_notes("a", "remember").unwrap();
        let mut app = App::new(tmp.path()).unwrap();

        app.handle_input(Input::Advance);
        app.handle_input(Input::Advance);
        let view = app.handle_input(Input::Previous);

        let selected = view.detail.selected().unwrap();
        assert_eq!(selected.kind, Artifact::Notes);
        assert_eq!(selected.body, "remember");
        assert_eq!(view.snippets.cursor(), 0);
    }

    #[test]
    fn corrupt_category_keeps_navigation_alive() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("bad")).unwrap();
        fs::write(tmp.path().join("bad").join("metadata.json"), "{not json").unwrap();
        seed(tmp.path(), "go", &[("a", "1")]);

        let mut app = App::new(tmp.path()).unwrap();
        assert_eq!(app.view().categories.selected().unwrap(), "bad");
        assert!(app.view().status.unwrap().contains("corrupt"));
        assert!(app.view().snippets.is_empty());
        assert!(app.view().metadata.is_none());

        app.handle_input(Input::Next);
        assert!(app.view().status.is_none());
        assert_eq!(snippet_names(&app), ["a"]);
    }

    #[test]
    fn reload_recovers_after_repair() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("go");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("metadata.json"), "").unwrap();

        let mut app = App::new(tmp.path()).unwrap();
        assert!(app.view().status.is_some());

        fs::remove_file(dir.join("metadata.json")).unwrap();
        seed(tmp.path(), "go", &[("fixed", "ok")]);

        let view = app.handle_input(Input::Reload);
        assert!(view.status.is_none());
        assert_eq!(view.snippets.items(), ["fixed"]);
    }

    #[test]
    fn artifact_error_clears_on_next_snippet() {
        let tmp = tempfile::tempdir().unwrap();
        seed(tmp.path(), "go", &[("a", "1"), ("b", "2")]);
        fs::create_dir(tmp.path().join("go").join("a").join("notes.md")).unwrap();

        let mut app = App::new(tmp.path()).unwrap();
        assert!(app.view().status.unwrap().contains("notes.md"));

        app.handle_input(Input::Advance);
        let view = app.handle_input(Input::Next);
        assert_eq!(view.snippets.selected().unwrap(), "b");
        assert!(view.status.is_none());
        assert_eq!(view.detail.selected().unwrap().body, "2");

        let view = app.handle_input(Input::Previous);
        assert!(view.status.is_some());
    }
}
