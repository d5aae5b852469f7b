/// Terminal front end: feeds crossterm input into a `Viewer` and draws it
/// with the ASCII rasterizer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, terminal,
};
use fc3d_core::{ControlMode, Error, Interval, Result, ViewConfig, ViewEvent, Viewer};
use log::{error, info};
use std::io::{stdout, IsTerminal, Stdout};
use std::time::Instant;

pub mod cli;
pub mod renderer;

pub use renderer::{AsciiRenderer, CELL_ASPECT};

/// What the main loop does with one terminal event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    View(ViewEvent),
    Quit,
    Ignore,
}

/// Translates crossterm events into view events. Tracks the last drag
/// position so drags become relative deltas.
#[derive(Debug, Default)]
pub struct InputMapper {
    drag_from: Option<(u16, u16)>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) => {
                if *kind == KeyEventKind::Release {
                    return Action::Ignore;
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                    KeyCode::Left => Action::View(ViewEvent::RotateLeft),
                    KeyCode::Right => Action::View(ViewEvent::RotateRight),
                    _ => Action::Ignore,
                }
            }
            Event::Mouse(mouse) => self.map_mouse(mouse),
            Event::Resize(columns, rows) => Action::View(ViewEvent::Resize {
                width: u32::from(*columns),
                height: u32::from(*rows) * CELL_ASPECT,
            }),
            _ => Action::Ignore,
        }
    }

    fn map_mouse(&mut self, mouse: &MouseEvent) -> Action {
        let here = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_from = Some(here);
                Action::Ignore
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some((column, row)) = self.drag_from.replace(here) else {
                    return Action::Ignore;
                };
                Action::View(ViewEvent::Drag {
                    dx: f32::from(here.0) - f32::from(column),
                    dy: (f32::from(here.1) - f32::from(row)) * CELL_ASPECT as f32,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_from = None;
                Action::Ignore
            }
            MouseEventKind::ScrollUp => Action::View(ViewEvent::Zoom { notches: 1.0 }),
            MouseEventKind::ScrollDown => Action::View(ViewEvent::Zoom { notches: -1.0 }),
            _ => Action::Ignore,
        }
    }
}

/// Check that stdout is an interactive terminal with a usable size.
/// Returns the size in columns and rows.
pub fn check_terminal() -> Result<(u16, u16)> {
    if !stdout().is_terminal() {
        return Err(Error::capability("interactive terminal"));
    }
    let (columns, rows) = terminal::size()?;
    if columns == 0 || rows == 0 {
        return Err(Error::capability("terminal with a visible area"));
    }
    Ok((columns, rows))
}

fn status_line(mode: ControlMode) -> &'static str {
    match mode {
        ControlMode::Keys => "FC3D | Left/Right=Rotate Q=Quit",
        ControlMode::Orbit => "FC3D | Drag=Orbit Wheel=Zoom Q=Quit",
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    config: ViewConfig,
    input: InputMapper,
    running: bool,
}

impl TerminalApp {
    /// Check the terminal and size the view to it. Fails before any scene
    /// setup when there is no terminal to draw on.
    pub fn new(mut config: ViewConfig) -> Result<Self> {
        let (columns, rows) = check_terminal().map_err(|err| {
            error!("{}", err);
            err
        })?;
        config.width = u32::from(columns);
        config.height = u32::from(rows) * CELL_ASPECT;
        info!(
            "terminal {}x{}, mode {:?}, policy {:?}",
            columns,
            rows,
            config.mode,
            config.redraw_policy()
        );

        Ok(Self {
            config,
            input: InputMapper::new(),
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.open_view().and_then(|mut viewer| self.main_loop(&mut viewer));

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    /// The viewer may draw as soon as it exists, so it is only built once the
    /// alternate screen is up
    fn open_view(&self) -> Result<Viewer<AsciiRenderer<Stdout>>> {
        let mut renderer = AsciiRenderer::new(
            stdout(),
            self.config.width as usize,
            (self.config.height / CELL_ASPECT) as usize,
        );
        renderer.set_status(status_line(self.config.mode));
        Viewer::new(&self.config, renderer)
    }

    fn main_loop(&mut self, viewer: &mut Viewer<AsciiRenderer<Stdout>>) -> Result<()> {
        let mut timer = Interval::new(self.config.poll_interval());
        let mut last_tick = Instant::now();

        while self.running {
            // Handle input, waiting at most until the next tick is due
            if event::poll(timer.remaining())? {
                match self.input.map(&event::read()?) {
                    Action::Quit => self.running = false,
                    Action::View(view_event) => {
                        viewer.handle(view_event)?;
                    }
                    Action::Ignore => {}
                }
            }

            let now = Instant::now();
            if timer.tick(now - last_tick) {
                viewer.tick()?;
            }
            last_tick = now;
        }

        info!("drew {} frames", viewer.frames());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_arrow_keys_rotate() {
        let mut input = InputMapper::new();
        assert_eq!(input.map(&key(KeyCode::Left)), Action::View(ViewEvent::RotateLeft));
        assert_eq!(input.map(&key(KeyCode::Right)), Action::View(ViewEvent::RotateRight));
        assert_eq!(input.map(&key(KeyCode::Up)), Action::Ignore);
        assert_eq!(input.map(&key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(input.map(&key(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut input = InputMapper::new();
        let mut release = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(input.map(&Event::Key(release)), Action::Ignore);
    }

    #[test]
    fn test_drag_becomes_relative() {
        let mut input = InputMapper::new();
        // Drag without a press first is ignored
        assert_eq!(
            input.map(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 5)),
            Action::Ignore
        );

        input.map(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        assert_eq!(
            input.map(&mouse(MouseEventKind::Drag(MouseButton::Left), 13, 5)),
            Action::View(ViewEvent::Drag { dx: 3.0, dy: 2.0 })
        );
        assert_eq!(
            input.map(&mouse(MouseEventKind::Drag(MouseButton::Left), 12, 5)),
            Action::View(ViewEvent::Drag { dx: -1.0, dy: 0.0 })
        );

        input.map(&mouse(MouseEventKind::Up(MouseButton::Left), 12, 5));
        assert_eq!(
            input.map(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 5)),
            Action::Ignore
        );
    }

    #[test]
    fn test_wheel_zooms() {
        let mut input = InputMapper::new();
        assert_eq!(
            input.map(&mouse(MouseEventKind::ScrollUp, 0, 0)),
            Action::View(ViewEvent::Zoom { notches: 1.0 })
        );
        assert_eq!(
            input.map(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            Action::View(ViewEvent::Zoom { notches: -1.0 })
        );
    }

    #[test]
    fn test_resize_in_pixels() {
        let mut input = InputMapper::new();
        assert_eq!(
            input.map(&Event::Resize(100, 30)),
            Action::View(ViewEvent::Resize {
                width: 100,
                height: 60
            })
        );
    }
}
