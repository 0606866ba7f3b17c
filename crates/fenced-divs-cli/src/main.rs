mod terminal;

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fenced_divs_config::{Config, StyleSettings};
use fenced_divs_engine::{
    DecorationField, Document, FencedDivField, FencedDivState, HtmlRenderer, SelRange,
    Selection, Transaction,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env, fs,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

use terminal::TerminalWidgets;

const USAGE: &str = "Usage: fenced-divs-cli <file.md> [--html] [--config <path>]";

#[derive(Debug, PartialEq)]
struct Args {
    file: PathBuf,
    html: bool,
    config: Option<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut file = None;
    let mut html = false;
    let mut config = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--html" => html = true,
            "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("--config needs a path"),
            },
            flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
            _ if file.is_some() => bail!("Only one file can be previewed"),
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    match file {
        Some(file) => Ok(Args { file, html, config }),
        None => bail!("No markdown file given"),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            log::info!("Using config file from CLI argument: {}", path.display());
            Config::load_from_path(&path)?
                .with_context(|| format!("Config file '{}' not found", path.display()))
        }
        None => {
            log::info!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

struct App {
    document: Document,
    field: FencedDivField,
    decorations: DecorationField<Vec<Line<'static>>>,
    widgets: TerminalWidgets,
    /// Start offset of the rendered div Enter would click.
    focus: Option<usize>,
}

impl App {
    fn new(document: Document, settings: StyleSettings) -> Self {
        let field = FencedDivField::new(&document.load_transaction());
        let widgets = TerminalWidgets::new(settings);
        let mut decorations = DecorationField::new(true);
        decorations.update(field.state(), &widgets);

        Self {
            document,
            field,
            decorations,
            widgets,
            focus: None,
        }
    }

    fn apply(&mut self, tr: Transaction) {
        let state = self.field.apply(&tr);
        if self.decorations.update(state, &self.widgets) {
            log::debug!("{} fenced divs rendered", self.decorations.decorations().len());
        }
        let decorations = self.decorations.decorations();
        self.focus = self
            .focus
            .filter(|from| decorations.starting_at(*from).is_some());
    }

    fn caret(&self) -> usize {
        self.document.selection().main().map_or(0, |r| r.head)
    }

    fn line_starts(&self) -> Vec<usize> {
        self.document.lines().map(|l| l.start).collect()
    }

    /// Moves the caret to the start of the line `delta` lines away.
    fn move_caret(&mut self, delta: isize) -> Result<()> {
        let starts = self.line_starts();
        if starts.is_empty() {
            return Ok(());
        }
        let caret = self.caret();
        let current = starts.iter().rposition(|s| *s <= caret).unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(starts.len() - 1);
        let tr = self.document.set_selection(Selection::cursor(starts[target]))?;
        self.apply(tr);
        Ok(())
    }

    /// Cycles focus through the rendered divs in document order.
    fn cycle_focus(&mut self, forward: bool) {
        let starts: Vec<usize> = self.decorations.decorations().iter().map(|d| d.from).collect();
        if starts.is_empty() {
            self.focus = None;
            return;
        }
        let next = match self.focus.and_then(|f| starts.iter().position(|s| *s == f)) {
            Some(i) if forward => (i + 1) % starts.len(),
            Some(i) => (i + starts.len() - 1) % starts.len(),
            None if forward => 0,
            None => starts.len() - 1,
        };
        self.focus = Some(starts[next]);
    }

    fn click_focused(&mut self) -> Result<()> {
        let Some(from) = self.focus else {
            return Ok(());
        };
        let Some(deco) = self.decorations.decorations().starting_at(from) else {
            return Ok(());
        };
        let div = deco.div.clone();
        let tr = self.document.click(&div)?;
        self.apply(tr);
        Ok(())
    }

    /// The document with rendered divs in place of their source lines.
    fn view_lines(&self) -> Vec<Line<'static>> {
        let caret = self.caret();
        let decorations = self.decorations.decorations();
        let mut out = Vec::new();
        let mut hidden_until = None;

        for line in self.document.lines() {
            if hidden_until.is_some_and(|to| line.start <= to) {
                continue;
            }
            hidden_until = None;

            if let Some(deco) = decorations.starting_at(line.start) {
                let focused = self.focus == Some(deco.from);
                out.extend(deco.widget.iter().cloned().map(|l| {
                    if focused {
                        l.style(Style::default().add_modifier(Modifier::REVERSED))
                    } else {
                        l
                    }
                }));
                hidden_until = Some(deco.to);
                continue;
            }

            let end = line.start + line.text.len();
            if line.start <= caret && caret <= end {
                out.push(Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Yellow)),
                    Span::raw(line.text),
                ]));
            } else {
                out.push(Line::from(vec![Span::raw("  "), Span::raw(line.text)]));
            }
        }

        out
    }
}

fn print_html(document: &Document, settings: &StyleSettings) {
    let state = FencedDivState::new(document.rope(), &Selection::new(Vec::<SelRange>::new()));
    let renderer = HtmlRenderer::new(settings);
    for div in state.parsed() {
        print!("{}", renderer.render(div));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    log::info!("fenced-divs-cli starting up");

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = load_config(args.config.as_ref())?;

    log::info!("Loading {}", args.file.display());
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read '{}'", args.file.display()))?;
    let document = Document::from_bytes(&bytes)
        .with_context(|| format!("Failed to load '{}'", args.file.display()))?;

    if args.html {
        print_html(&document, &config.styling);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(document, config.styling);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.move_caret(1)?,
                KeyCode::Up | KeyCode::Char('k') => app.move_caret(-1)?,
                KeyCode::Tab => app.cycle_focus(true),
                KeyCode::BackTab => app.cycle_focus(false),
                KeyCode::Enter => app.click_focused()?,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let content = Paragraph::new(app.view_lines())
        .block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(content, chunks[0]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k ↓/j: Move caret | "),
        Span::raw("Tab/Shift-Tab: Focus div | "),
        Span::raw("Enter: Edit focused div"),
    ]);
    f.render_widget(Paragraph::new(vec![help_text]), chunks[1]);
}
