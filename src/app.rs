//! Application setup and the terminal event loop.

use std::io::{self, Write};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use tracing::{info, warn};

use crate::models::game::MoveRecord;
use crate::models::{
    Direction, GameEvent, GameModel, PromotionPrompt, RuleAuthority, SearchEngine, Suggestion,
    Transition,
};
use crate::ui::display::build_frame;
use crate::ui::prompt::TerminalPrompt;
use crate::ui::views::render_frame;
use crate::ui::{BoardLayout, Theme};

/// What an input event asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(GameEvent),
    Redraw,
    Quit,
}

pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Left | KeyCode::Char('h') => Action::Game(GameEvent::Cursor(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Action::Game(GameEvent::Cursor(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Action::Game(GameEvent::Cursor(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Action::Game(GameEvent::Cursor(Direction::Down)),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Game(GameEvent::Commit),
        KeyCode::Esc => Action::Game(GameEvent::Cancel),
        _ => return None,
    };
    Some(action)
}

pub fn action_for_mouse(mouse: MouseEvent, layout: &BoardLayout) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout
            .pos_to_square(mouse.column, mouse.row)
            .map(|square| Action::Game(GameEvent::Click(square))),
        _ => None,
    }
}

pub fn action_for_event(event: Event, layout: &BoardLayout) -> Option<Action> {
    match event {
        Event::Key(key) => action_for_key(key),
        Event::Mouse(mouse) => action_for_mouse(mouse, layout),
        Event::Resize(..) => Some(Action::Redraw),
        _ => None,
    }
}

/// Game plus the optional search engine and what the footer shows about them
pub struct App<A: RuleAuthority> {
    game: GameModel<A>,
    engine: Option<Box<dyn SearchEngine>>,
    last_move: Option<MoveRecord>,
    suggestion: Option<Suggestion>,
    status: Option<String>,
    layout: BoardLayout,
    theme: Theme,
}

impl<A: RuleAuthority> App<A> {
    pub fn new(game: GameModel<A>, engine: Option<Box<dyn SearchEngine>>, theme: Theme) -> Self {
        let mut app = Self {
            game,
            engine,
            last_move: None,
            suggestion: None,
            status: None,
            layout: BoardLayout::default(),
            theme,
        };
        app.refresh_suggestion();
        app
    }

    /// Feed one game event through the state machine
    pub fn dispatch(&mut self, event: GameEvent, prompt: &mut dyn PromotionPrompt) -> Transition {
        let transition = self.game.handle(event, prompt);
        match &transition {
            Transition::Moved(record) => {
                self.last_move = Some(record.clone());
                self.status = None;
                self.refresh_suggestion();
            }
            Transition::Rejected(e) => self.status = Some(e.to_string()),
            Transition::Armed | Transition::Cancelled => self.status = None,
            Transition::Idle => {}
        }
        transition
    }

    /// Ask the engine about the current position
    fn refresh_suggestion(&mut self) {
        self.suggestion = None;
        if self.game.outcome().is_over() {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let authority = self.game.authority();
        match engine.suggest(authority.start_fen(), authority.moves_played()) {
            Ok(suggestion) => self.suggestion = Some(suggestion),
            Err(e) => {
                warn!(error = %e, "engine query failed, suggestions disabled");
                self.status = Some(format!("Engine: {e}"));
                self.engine = None;
            }
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let frame = build_frame(
            &self.game,
            self.last_move.as_ref(),
            self.suggestion.as_ref(),
            self.status.as_deref(),
        );
        render_frame(out, &frame, &self.layout, &self.theme)
    }

    /// Read terminal events until the player quits
    pub fn run(&mut self) -> anyhow::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut stdout = io::stdout();
        info!("new game started");
        self.draw(&mut stdout)?;

        loop {
            let Some(action) = action_for_event(event::read()?, &self.layout) else {
                continue;
            };
            match action {
                Action::Quit => break,
                Action::Redraw => {}
                Action::Game(game_event) => {
                    let mut prompt = TerminalPrompt::new(&mut stdout, self.layout, self.theme);
                    self.dispatch(game_event, &mut prompt);
                }
            }
            self.draw(&mut stdout)?;
        }

        info!(moves = self.game.history().ply(), "game closed");
        Ok(())
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
