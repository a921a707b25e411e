use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flurry_config::{Config, ConfigError};
use flurry_core::{Clock, Command, Size, SystemClock};
use flurry_overlay::{EffectManager, LayerController, Settings, Stylesheet, TerminalOverlay, Timing};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

mod logging;

/// Colour of the page text and key hints.
const ACCENT: Color = Color::Cyan;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let (config, no_config_dir) = config_or_default(Config::load())?;
    logging::init(&config.log)?;
    if no_config_dir {
        tracing::warn!("no configuration directory, using defaults");
    }
    tracing::info!(layers = config.layers.len(), tick_ms = config.tick_ms, "starting");

    let (width, height) = crossterm::terminal::size()?;
    let terminal = ratatui::init();
    let result = App::new(&config, width, height, SystemClock).run(terminal);
    ratatui::restore();
    result
}

/// Fall back to defaults when the platform has no configuration directory.
///
/// The flag reports the fallback so it can be logged once logging is up.
fn config_or_default(loaded: Result<Config, ConfigError>) -> Result<(Config, bool), ConfigError> {
    match loaded {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::NoConfigDir) => Ok((Config::default(), true)),
        Err(err) => Err(err),
    }
}

/// Translate the configuration file into overlay settings.
fn settings(config: &Config) -> Settings {
    Settings {
        stylesheet: Stylesheet {
            cell: Size::new(config.overlay.cell_width, config.overlay.cell_height),
            flake_size: config.overlay.flake_size,
            tint: config.overlay.tint,
        },
        timing: Timing {
            tick_ms: config.tick_ms,
            stagger_max_ms: config.stagger_max_ms,
        },
        profiles: config.layers.clone(),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    /// Is the application running?
    running: bool,
    /// The snowfall drawn over the page.
    snow: EffectManager<TerminalOverlay, C>,
    /// Text typed after `:`, while the command line is open.
    prompt: Option<String>,
    /// Last command that reached the layers.
    last_command: Option<Command>,
    /// How long to wait for input before the next animation step.
    poll_interval: Duration,
}

impl<C: Clock> App<C> {
    /// Construct a new instance of [`App`] for a `width` x `height` cell terminal.
    pub fn new(config: &Config, width: u16, height: u16, clock: C) -> Self {
        let settings = settings(config);
        let viewport = settings.stylesheet.viewport_for(width, height);
        let snow = EffectManager::initialize(
            TerminalOverlay::new(),
            &settings,
            viewport,
            clock,
            &mut rand::thread_rng(),
        );
        Self {
            running: false,
            snow,
            prompt: None,
            last_command: None,
            poll_interval: Duration::from_millis(config.tick_ms.max(1)),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.snow.advance();
        }
        Ok(())
    }

    /// Renders the page, then the snow on top of it.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(3), // Title
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Layer status
            Constraint::Length(1), // Help text or command line
        ])
        .split(area);

        let title = Paragraph::new(vec![
            Line::from("❄  flurry  ❄").bold(),
            Line::from(""),
            Line::from("snow drifting over your terminal").dark_gray(),
        ])
        .style(Style::new().fg(ACCENT))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        frame.render_widget(self.status_line(), chunks[3]);

        let bottom = match &self.prompt {
            Some(text) => Line::from(vec![":".bold().fg(ACCENT), Span::raw(text.clone())]),
            None => help_line(),
        };
        frame.render_widget(bottom, chunks[4]);

        frame.render_widget(self.snow.surface(), area);
    }

    /// Per-layer live counts and whether the snow is running.
    fn status_line(&self) -> Line<'static> {
        let layers = self.snow.layers();
        let running = layers.iter().any(LayerController::is_active);
        let mut spans = vec![
            if running {
                "running".bold().fg(ACCENT)
            } else {
                "stopped".bold().dark_gray()
            },
            "  ".into(),
        ];
        for (index, layer) in layers.iter().enumerate() {
            spans.push(
                format!("L{} {}/{}  ", index + 1, layer.len(), layer.profile().limit).dark_gray(),
            );
        }
        if let Some(command) = self.last_command {
            spans.push(format!("last: {command}").dark_gray());
        }
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one tick so the snow keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Forward a terminal resize to the snow.
    fn on_resize(&mut self, width: u16, height: u16) {
        let viewport = self.snow.surface().viewport_for(width, height);
        self.snow.resize(viewport.width, viewport.height);
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.on_prompt_key(key);
            return;
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.run_command(Command::Start),
            (_, KeyCode::Char('x')) => self.run_command(Command::Stop),
            (_, KeyCode::Char('n')) => self.run_command(Command::Spawn),
            (_, KeyCode::Char('c')) => self.run_command(Command::Clear),
            (_, KeyCode::Char(':')) => self.prompt = Some(String::new()),
            _ => {}
        }
    }

    /// Edit the command line; Enter runs it, Esc abandons it.
    fn on_prompt_key(&mut self, key: KeyEvent) {
        let Some(text) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Enter => {
                let text = self.prompt.take().unwrap_or_default();
                if let Some(command) = self.snow.command(&text) {
                    self.last_command = Some(command);
                }
            }
            KeyCode::Char(c) => text.push(c),
            _ => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        self.snow.dispatch(command);
        self.last_command = Some(command);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Key hints shown at the bottom of the page.
fn help_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in [
        ("s", " start  "),
        ("x", " stop  "),
        ("n", " spawn  "),
        ("c", " clear  "),
        (":", " command  "),
        ("q", " quit"),
    ] {
        spans.push(key.bold().fg(ACCENT));
        spans.push(label.dark_gray());
    }
    Line::from(spans).centered()
}
