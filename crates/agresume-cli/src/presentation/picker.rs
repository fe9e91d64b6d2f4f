//! Interactive session picker.
//!
//! `PickerState` owns the query, the filtered view and the selection, and
//! turns key presses into `PickerAction`s; `run_picker` drives it inside the
//! alternate screen.

use std::io;

use agresume_types::{PICKER_HINT, PICKER_TITLE, ROW_SEPARATOR, SELECTION_MARKER, ToolEvent};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::rows::Row;
use super::search::{FuzzySearch, haystack};

const NO_MATCHES: &str = "No matching sessions";
const QUERY_PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Continue,
    /// Index into the events the picker was built from
    Select(usize),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(usize),
    Cancelled,
}

pub struct PickerState {
    rows: Vec<Row>,
    haystacks: Vec<String>,
    search: FuzzySearch,
    query: String,
    filtered: Vec<usize>,
    list_state: ListState,
}

impl PickerState {
    pub fn new(events: &[ToolEvent]) -> Self {
        let now = Utc::now();
        let mut state = Self {
            rows: events.iter().map(|event| Row::new(event, now)).collect(),
            haystacks: events.iter().map(haystack).collect(),
            search: FuzzySearch::new(),
            query: String::new(),
            filtered: Vec::new(),
            list_state: ListState::default(),
        };
        state.refilter();
        state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Event indices currently shown, in display order
    pub fn visible(&self) -> &[usize] {
        &self.filtered
    }

    /// Event index under the cursor
    pub fn selected(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|pos| self.filtered.get(pos))
            .copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => PickerAction::Cancel,
            KeyCode::Char('c') if ctrl => PickerAction::Cancel,
            KeyCode::Enter => match self.selected() {
                Some(index) => PickerAction::Select(index),
                None => PickerAction::Continue,
            },
            KeyCode::Up => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                self.refilter();
                PickerAction::Continue
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
                PickerAction::Continue
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.refilter();
                PickerAction::Continue
            }
            _ => PickerAction::Continue,
        }
    }

    fn move_up(&mut self) -> PickerAction {
        if let Some(pos) = self.list_state.selected() {
            self.list_state.select(Some(pos.saturating_sub(1)));
        }
        PickerAction::Continue
    }

    fn move_down(&mut self) -> PickerAction {
        if let Some(pos) = self.list_state.selected()
            && pos + 1 < self.filtered.len()
        {
            self.list_state.select(Some(pos + 1));
        }
        PickerAction::Continue
    }

    fn refilter(&mut self) {
        self.filtered = self.search.rank(&self.query, &self.haystacks);
        let selection = if self.filtered.is_empty() { None } else { Some(0) };
        self.list_state.select(selection);
    }

    fn render(&mut self, f: &mut Frame) {
        let [title_area, query_area, list_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(f.area());

        let title = Paragraph::new(Span::styled(
            PICKER_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        f.render_widget(title, title_area);

        let query = Paragraph::new(Line::from(vec![
            Span::styled(QUERY_PROMPT, Style::default().fg(Color::Cyan)),
            Span::raw(self.query.as_str()),
        ]));
        f.render_widget(query, query_area);
        let cursor_x = query_area.x + (QUERY_PROMPT.len() + self.query.chars().count()) as u16;
        f.set_cursor_position((cursor_x.min(query_area.right().saturating_sub(1)), query_area.y));

        if self.filtered.is_empty() {
            let empty = Paragraph::new(Span::styled(
                NO_MATCHES,
                Style::default().fg(Color::DarkGray),
            ));
            f.render_widget(empty, list_area);
        } else {
            let items: Vec<ListItem> = self
                .filtered
                .iter()
                .map(|&index| {
                    let row = &self.rows[index];
                    ListItem::new(Line::from(vec![
                        Span::styled(row.label.as_str(), Style::default().fg(Color::Cyan)),
                        Span::raw(ROW_SEPARATOR),
                        Span::styled(row.when.as_str(), Style::default().fg(Color::DarkGray)),
                        Span::raw(ROW_SEPARATOR),
                        Span::raw(row.summary.as_str()),
                    ]))
                })
                .collect();

            let marker = format!("{} ", SELECTION_MARKER);
            let list = List::new(items)
                .highlight_symbol(&marker)
                .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
            f.render_stateful_widget(list, list_area, &mut self.list_state);
        }

        let hint = Paragraph::new(Span::styled(PICKER_HINT, Style::default().fg(Color::DarkGray)));
        f.render_widget(hint, hint_area);
    }
}

/// Show the picker full-screen until the user picks or cancels
pub fn run_picker(events: &[ToolEvent]) -> Result<PickerOutcome> {
    let mut state = PickerState::new(events);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut state);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut PickerState,
) -> Result<PickerOutcome> {
    loop {
        terminal.draw(|f| state.render(f))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not release
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match state.handle_key(key) {
                PickerAction::Continue => {}
                PickerAction::Select(index) => return Ok(PickerOutcome::Selected(index)),
                PickerAction::Cancel => return Ok(PickerOutcome::Cancelled),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agresume_types::{Confidence, ResumeDescriptor};
    use chrono::Duration;

    fn event(id: &str, label: &str, summary: &str, minutes_ago: i64) -> ToolEvent {
        ToolEvent {
            id: id.to_string(),
            label: label.to_string(),
            occurred_at: Utc::now() - Duration::minutes(minutes_ago),
            source: format!("{}.jsonl", id),
            confidence: Confidence::High,
            summary: summary.to_string(),
            resume: Some(ResumeDescriptor::launch("true")),
        }
    }

    fn events() -> Vec<ToolEvent> {
        vec![
            event("codex-1", "Codex", "Add a retry loop", 1),
            event("claude-2", "Claude Code", "Explain the borrow checker", 10),
            event("gemini-3", "Gemini", "Summarize the open TODOs", 100),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut PickerState, text: &str) {
        for c in text.chars() {
            assert_eq!(state.handle_key(key(KeyCode::Char(c))), PickerAction::Continue);
        }
    }

    #[test]
    fn test_initial_state_selects_newest() {
        let state = PickerState::new(&events());
        assert_eq!(state.visible(), &[0, 1, 2]);
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_enter_selects_highlighted_event() {
        let mut state = PickerState::new(&events());
        assert_eq!(state.handle_key(key(KeyCode::Down)), PickerAction::Continue);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PickerAction::Select(1));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = PickerState::new(&events());
        state.handle_key(key(KeyCode::Up));
        assert_eq!(state.selected(), Some(0));

        for _ in 0..5 {
            state.handle_key(key(KeyCode::Down));
        }
        assert_eq!(state.selected(), Some(2));

        state.handle_key(ctrl('p'));
        assert_eq!(state.selected(), Some(1));
        state.handle_key(ctrl('n'));
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn test_typing_filters_and_resets_selection() {
        let mut state = PickerState::new(&events());
        state.handle_key(key(KeyCode::Down));
        type_text(&mut state, "borrow");

        assert_eq!(state.query(), "borrow");
        assert_eq!(state.visible(), &[1]);
        assert_eq!(state.selected(), Some(1));
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PickerAction::Select(1));
    }

    #[test]
    fn test_no_matches_enter_does_nothing() {
        let mut state = PickerState::new(&events());
        type_text(&mut state, "zzzzqqq");

        assert!(state.visible().is_empty());
        assert_eq!(state.selected(), None);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PickerAction::Continue);
    }

    #[test]
    fn test_backspace_and_clear_restore_list() {
        let mut state = PickerState::new(&events());
        type_text(&mut state, "gemini");
        assert_eq!(state.visible(), &[2]);

        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.query(), "gemin");

        state.handle_key(ctrl('u'));
        assert_eq!(state.query(), "");
        assert_eq!(state.visible(), &[0, 1, 2]);

        // Backspace on an empty query is a no-op
        state.handle_key(key(KeyCode::Backspace));
        assert_eq!(state.visible(), &[0, 1, 2]);
    }

    #[test]
    fn test_cancel_keys() {
        let mut state = PickerState::new(&events());
        assert_eq!(state.handle_key(key(KeyCode::Esc)), PickerAction::Cancel);
        assert_eq!(state.handle_key(ctrl('c')), PickerAction::Cancel);
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_empty_event_list() {
        let mut state = PickerState::new(&[]);
        assert_eq!(state.selected(), None);
        assert_eq!(state.handle_key(key(KeyCode::Down)), PickerAction::Continue);
        assert_eq!(state.handle_key(key(KeyCode::Enter)), PickerAction::Continue);
    }
}
