//! Gallery: browse, preview, play and delete library animations.
//!
//! `GalleryState` is plain data driven by key events; it never touches the
//! terminal or the filesystem. `run_gallery` wires it to the library, the
//! native player and a ratatui terminal.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::status_footer::{render_footer, render_footer_text, render_status_line};
use super::ui::{centered_box, centered_rect, gallery_layout};
use crate::animation::{Animation, Library, LibraryItem};
use crate::player::{play_native, LoopCount, PlaybackResult, Playlist};
use crate::theme::{current_theme, Theme};

/// UI mode of the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a name filter
    Filter,
    ConfirmDelete,
    Help,
}

/// What the runner should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    None,
    Quit,
    Play(PathBuf),
    Delete(PathBuf),
    Refresh,
}

#[derive(Debug)]
struct Preview {
    path: PathBuf,
    animation: Result<Animation, String>,
}

/// Selection, filter and preview state of the gallery.
#[derive(Debug, Default)]
pub struct GalleryState {
    items: Vec<LibraryItem>,
    /// Indices into `items` matching the filter
    visible: Vec<usize>,
    /// Index into `visible`
    selected: usize,
    filter: String,
    pub mode: Mode,
    preview: Option<Preview>,
    pub preview_tick: usize,
    pub status_message: Option<String>,
}

impl GalleryState {
    pub fn new(items: Vec<LibraryItem>) -> Self {
        let mut state = Self::default();
        state.set_items(items);
        state
    }

    /// Replace the items, keeping the selection on the same file if it survives.
    pub fn set_items(&mut self, items: Vec<LibraryItem>) {
        let current = self.selected_item().map(|i| i.path.clone());
        self.items = items;
        self.rebuild_visible(current);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &LibraryItem> {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.visible.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&LibraryItem> {
        self.visible.get(self.selected).map(|&i| &self.items[i])
    }

    /// Re-run the filter, keeping the selected file selected while visible.
    fn apply_filter(&mut self) {
        let current = self.selected_item().map(|i| i.path.clone());
        self.rebuild_visible(current);
    }

    /// Case-insensitive substring match on name and file stem.
    fn rebuild_visible(&mut self, keep: Option<PathBuf>) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.file_stem().to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect();
        let kept = keep.and_then(|path| self.visible.iter().position(|&i| self.items[i].path == path));
        self.selected = match kept {
            Some(pos) => pos,
            None => self.selected.min(self.visible.len().saturating_sub(1)),
        };
    }

    fn select(&mut self, index: usize) {
        if self.visible.is_empty() {
            return;
        }
        let index = index.min(self.visible.len() - 1);
        if index != self.selected {
            self.selected = index;
            self.preview_tick = 0;
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Path whose animation should be loaded for the preview, if any.
    pub fn preview_request(&self) -> Option<&Path> {
        let selected = self.selected_item()?;
        match &self.preview {
            Some(p) if p.path == selected.path => None,
            _ => Some(&selected.path),
        }
    }

    pub fn set_preview(&mut self, path: PathBuf, animation: Result<Animation, String>) {
        self.preview = Some(Preview { path, animation });
        self.preview_tick = 0;
    }

    /// Frame of the selected animation at the current preview tick.
    pub fn preview_frame(&self) -> Option<&str> {
        let preview = self.current_preview()?;
        let animation = preview.animation.as_ref().ok()?;
        if animation.data.is_empty() {
            return None;
        }
        Some(&animation.data[self.preview_tick % animation.data.len()])
    }

    pub fn preview_error(&self) -> Option<&str> {
        self.current_preview()?.animation.as_ref().err().map(String::as_str)
    }

    fn current_preview(&self) -> Option<&Preview> {
        let selected = self.selected_item()?;
        self.preview.as_ref().filter(|p| p.path == selected.path)
    }

    pub fn advance_preview(&mut self) {
        self.preview_tick = self.preview_tick.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> GalleryAction {
        if key.kind == KeyEventKind::Release {
            return GalleryAction::None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return GalleryAction::Quit;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Filter => {
                self.handle_filter_key(key);
                GalleryAction::None
            }
            Mode::ConfirmDelete => self.handle_confirm_delete_key(key),
            Mode::Help => {
                self.mode = Mode::Normal;
                GalleryAction::None
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> GalleryAction {
        self.status_message = None;
        match key.code {
            KeyCode::Char('q') => return GalleryAction::Quit,
            KeyCode::Esc if self.filter.is_empty() => return GalleryAction::Quit,
            KeyCode::Esc => {
                self.filter.clear();
                self.apply_filter();
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(usize::MAX),
            KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(item) = self.selected_item() {
                    return GalleryAction::Play(item.path.clone());
                }
            }
            KeyCode::Char('/') => self.mode = Mode::Filter,
            KeyCode::Char('d') => {
                if self.selected_item().is_some() {
                    self.mode = Mode::ConfirmDelete;
                }
            }
            KeyCode::Char('r') => return GalleryAction::Refresh,
            KeyCode::Char('?') => self.mode = Mode::Help,
            _ => {}
        }
        GalleryAction::None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Esc => {
                self.filter.clear();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.filter.pop();
            }
            KeyCode::Char(c) => self.filter.push(c),
            _ => return,
        }
        self.apply_filter();
        self.preview_tick = 0;
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> GalleryAction {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = Mode::Normal;
                if let Some(item) = self.selected_item() {
                    return GalleryAction::Delete(item.path.clone());
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
        GalleryAction::None
    }

    fn status_text(&self) -> String {
        if let Some(msg) = &self.status_message {
            return msg.clone();
        }
        match self.mode {
            Mode::Filter => format!("Filter: {}_", self.filter),
            Mode::ConfirmDelete => "Delete this animation? (y/n)".to_string(),
            Mode::Help => String::new(),
            Mode::Normal if self.filter.is_empty() => format!("{} animations", self.items.len()),
            Mode::Normal => format!(
                "{} of {} animations (filter: \"{}\")",
                self.visible.len(),
                self.items.len(),
                self.filter
            ),
        }
    }
}

/// Playback settings used by the gallery.
#[derive(Debug, Clone, Copy)]
pub struct GalleryOptions {
    /// Tick delay forced on every animation
    pub delay_ms: Option<u64>,
    /// Tick delay when neither the override nor the animation sets one
    pub default_delay_ms: u64,
    pub loops: LoopCount,
}

impl GalleryOptions {
    fn tick_delay(&self, animation: &Animation) -> Duration {
        let delay = self.delay_ms.or(animation.frame_delay_ms).unwrap_or(self.default_delay_ms);
        Duration::from_millis(delay.max(1))
    }
}

/// Draw the whole gallery screen.
pub fn draw(frame: &mut Frame, state: &GalleryState) {
    let area = frame.area();
    let (list_area, preview_area, status_area, footer_area) = gallery_layout(area);
    let theme = current_theme();

    render_list(frame, list_area, state, &theme);
    render_preview(frame, preview_area, state, &theme);
    render_status_line(frame, status_area, &state.status_text());
    match state.mode {
        Mode::Normal => render_footer(
            frame,
            footer_area,
            &[
                ("\u{2191}\u{2193}", "select"),
                ("Enter", "play"),
                ("/", "filter"),
                ("d", "delete"),
                ("?", "help"),
                ("q", "quit"),
            ],
        ),
        Mode::Filter => render_footer_text(frame, footer_area, "Enter: apply | Esc: clear | Backspace: delete char"),
        Mode::ConfirmDelete => render_footer_text(frame, footer_area, "y: confirm delete | n/Esc: cancel"),
        Mode::Help => render_footer_text(frame, footer_area, "Press any key to close help"),
    }

    match state.mode {
        Mode::Help => render_help_modal(frame, area, &theme),
        Mode::ConfirmDelete => {
            if let Some(item) = state.selected_item() {
                render_confirm_delete_modal(frame, area, &item.name, &theme);
            }
        }
        Mode::Normal | Mode::Filter => {}
    }
}

fn render_list(frame: &mut Frame, area: Rect, state: &GalleryState, theme: &Theme) {
    let items: Vec<ListItem> = state
        .visible_items()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(item.name.clone(), theme.text_style()),
                Span::styled(format!("  {}f", item.frame_count), theme.text_secondary_style()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.text_secondary_style())
                .title(" Animations "),
        )
        .highlight_style(theme.accent_bold_style())
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(state.selected_index());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &GalleryState, theme: &Theme) {
    let (title, body, details) = match state.selected_item() {
        None => (" Preview ".to_string(), Paragraph::new("No animations"), None),
        Some(item) => {
            let details = Line::from(Span::styled(
                format!(
                    " {}x{} | {} frames | {} | {} ",
                    item.width,
                    item.height,
                    item.frame_count,
                    item.size_human(),
                    item.modified_display()
                ),
                theme.text_secondary_style(),
            ));
            let body = match (state.preview_frame(), state.preview_error()) {
                (Some(frame_text), _) => Paragraph::new(frame_text.to_string()).style(theme.text_style()),
                (None, Some(err)) => Paragraph::new(format!("Failed to load: {err}"))
                    .style(theme.error_style())
                    .wrap(Wrap { trim: false }),
                (None, None) => Paragraph::new(""),
            };
            (format!(" {} ", item.name), body, Some(details))
        }
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(title);
    if let Some(details) = details {
        block = block.title_bottom(details);
    }
    frame.render_widget(body.block(block), area);
}

/// Render the help modal overlay.
pub fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let modal_area = centered_box(44, 17, area);
    frame.render_widget(Clear, modal_area);

    let help = Paragraph::new(build_help_text(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(help, modal_area);
}

fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), theme.accent_style()),
            Span::raw(desc),
        ])
    };
    vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        key("\u{2191}/\u{2193} j/k", "Select"),
        key("Home/End", "First/last"),
        key("Enter/p", "Play"),
        key("/", "Filter by name"),
        key("Esc", "Clear filter"),
        key("d", "Delete"),
        key("r", "Rescan library"),
        key("?", "This help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", theme.text_secondary_style())),
    ]
}

/// Render the delete confirmation modal.
pub fn render_confirm_delete_modal(frame: &mut Frame, area: Rect, name: &str, theme: &Theme) {
    let mut modal_area = centered_rect(60, 30, area);
    modal_area.height = modal_area.height.min(5);
    frame.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(Span::styled(format!("Delete \"{name}\"?"), theme.text_style())),
        Line::from(""),
        Line::from(Span::styled("y: confirm | n: cancel", theme.text_secondary_style())),
    ];
    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error_style())
            .title(" Confirm Delete "),
    );
    frame.render_widget(modal, modal_area);
}

/// Run the gallery until the user quits.
#[cfg(not(tarpaulin_include))]
pub fn run_gallery(library: &mut Library, options: GalleryOptions) -> Result<()> {
    let mut app = App::new(Duration::from_millis(options.default_delay_ms.max(1)))?;
    let mut state = GalleryState::new(library.items().to_vec());
    let mut last_advance = Instant::now();
    let mut preview_delay = app.tick_rate();

    loop {
        if let Some(path) = state.preview_request().map(Path::to_path_buf) {
            let loaded = Animation::load(&path).map_err(|e| e.to_string());
            if let Ok(animation) = &loaded {
                preview_delay = options.tick_delay(animation);
            }
            state.set_preview(path, loaded);
            last_advance = Instant::now();
        }

        app.draw(|frame| draw(frame, &state))?;

        let timeout = preview_delay.saturating_sub(last_advance.elapsed());
        if event::poll(timeout)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match state.handle_key(key) {
                GalleryAction::None => {}
                GalleryAction::Quit => break,
                GalleryAction::Refresh => {
                    library.refresh()?;
                    state.set_items(library.items().to_vec());
                    state.status_message = Some(format!("{} animations", library.items().len()));
                }
                GalleryAction::Play(path) => {
                    let message = play_from_gallery(&mut app, &path, &options)?;
                    state.status_message = Some(message);
                }
                GalleryAction::Delete(path) => {
                    let name = state.selected_item().map(|i| i.name.clone()).unwrap_or_default();
                    state.status_message = Some(match library.remove(&path) {
                        Ok(()) => format!("Deleted: {name}"),
                        Err(e) => format!("Failed to delete: {e}"),
                    });
                    state.set_items(library.items().to_vec());
                }
            }
        }

        if last_advance.elapsed() >= preview_delay {
            state.advance_preview();
            last_advance = Instant::now();
        }
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn play_from_gallery(app: &mut App, path: &Path, options: &GalleryOptions) -> Result<String> {
    let animation = match Animation::load(path) {
        Ok(a) => a,
        Err(e) => return Ok(format!("Failed to load: {e}")),
    };
    let name = animation.name.clone();
    let delay = options.tick_delay(&animation);
    let mut playlist = Playlist::default();
    playlist.push(animation, options.loops);

    app.suspend()?;
    let result = play_native(&playlist, delay);
    app.resume()?;

    Ok(match result? {
        PlaybackResult::Finished => format!("Finished: {name}"),
        PlaybackResult::Interrupted => format!("Stopped: {name}"),
    })
}
