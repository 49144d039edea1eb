// SPDX-License-Identifier: GPL-3.0-only

//! Terminal capture screen
//!
//! Renders the camera preview to the terminal using Unicode half-block
//! characters and drives the capture state machine from key presses.
//! Commands returned by the state machine are executed on a tokio
//! runtime; completions flow back in through a channel and are applied
//! between frames.

use crate::app::state::{AppModel, Command, Message, PermissionStatus, ScreenState};
use crate::backends::camera::CameraCapability;
use crate::backends::camera::types::CameraFrame;
use crate::backends::library::LibraryCapability;
use crate::config::Config;
use crate::constants::timing;
use crate::errors::{AppError, AppResult};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Run the interactive capture screen
pub fn run(
    camera: Arc<dyn CameraCapability>,
    library: Arc<dyn LibraryCapability>,
    config: Config,
) -> AppResult<()> {
    // Set up terminal
    enable_raw_mode().map_err(term_error)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(term_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(term_error)?;

    // Run the app
    let result = run_app(&mut terminal, camera, library, config);

    // Restore terminal
    disable_raw_mode().map_err(term_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(term_error)?;
    terminal.show_cursor().map_err(term_error)?;

    result
}

fn term_error(e: io::Error) -> AppError {
    AppError::Terminal(e.to_string())
}

/// Executes state machine commands against the capability providers.
///
/// Each command is spawned as a task; the resulting message is pushed
/// onto the channel and applied by the main loop on the next tick.
struct EffectRunner {
    runtime: tokio::runtime::Runtime,
    camera: Arc<dyn CameraCapability>,
    library: Arc<dyn LibraryCapability>,
    tx: mpsc::UnboundedSender<Message>,
}

impl EffectRunner {
    fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            self.execute(command);
        }
    }

    fn execute(&self, command: Command) {
        debug!(?command, "Executing command");
        match command {
            Command::RequestPermissions => {
                let camera = self.camera.request_permission();
                let library = self.library.request_permission();
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let _ = tx.send(Message::CameraPermission(camera.await));
                    let _ = tx.send(Message::LibraryPermission(library.await));
                });
            }
            Command::Capture(settings) => {
                let capture = self.camera.capture(settings);
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let _ = tx.send(Message::CaptureComplete(capture.await));
                });
            }
            Command::Persist(image) => {
                let persist = self.library.persist(image);
                let tx = self.tx.clone();
                self.runtime.spawn(async move {
                    let _ = tx.send(Message::SaveComplete(persist.await));
                });
            }
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    camera: Arc<dyn CameraCapability>,
    library: Arc<dyn LibraryCapability>,
    config: Config,
) -> AppResult<()> {
    let runtime = tokio::runtime::Runtime::new().map_err(term_error)?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut model = AppModel::new(config);
    let runner = EffectRunner {
        runtime,
        camera: Arc::clone(&camera),
        library,
        tx,
    };

    info!("Requesting permissions");
    runner.execute(Command::RequestPermissions);

    let mut show_help = false;

    loop {
        // Apply completed effects first so this frame reflects them.
        while let Ok(message) = rx.try_recv() {
            let follow_ups = model.update(message);
            runner.dispatch(follow_ups);
        }

        // Pull a fresh preview frame while live; the review screen shows
        // the held still instead.
        let preview = if model.screen_state() == ScreenState::Live {
            camera.preview_frame(model.settings)
        } else {
            None
        };

        terminal
            .draw(|f| draw_ui(f, &model, preview.as_deref(), show_help))
            .map_err(term_error)?;

        // Handle input with timeout for frame updates
        if event::poll(timing::EVENT_POLL_INTERVAL).map_err(term_error)?
            && let Event::Key(key) = event::read().map_err(term_error)?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('h') => show_help = !show_help,
                code => {
                    if let Some(message) = key_to_message(code) {
                        let follow_ups = model.update(message);
                        runner.dispatch(follow_ups);
                    }
                }
            }
        }
    }

    // Carry the last-used settings over to the next run.
    model.config.default_facing = model.settings.facing;
    model.config.default_flash = model.settings.flash;
    if let Err(e) = model.config.save() {
        error!(error = %e, "Failed to save config");
    }

    info!(photos_saved = model.photos_saved, "Capture screen closed");
    Ok(())
}

/// Map an intent key to its message. Legality is the state machine's
/// call; out-of-state intents are ignored there.
fn key_to_message(code: KeyCode) -> Option<Message> {
    match code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Message::Shutter),
        KeyCode::Char('f') => Some(Message::ToggleFlash),
        KeyCode::Char('c') => Some(Message::ToggleFacing),
        KeyCode::Char('s') => Some(Message::Save),
        KeyCode::Char('d') => Some(Message::Discard),
        _ => None,
    }
}

fn draw_ui(
    f: &mut ratatui::Frame,
    model: &AppModel,
    preview: Option<&CameraFrame>,
    show_help: bool,
) {
    let area = f.area();

    // Reserve bottom line for status
    let frame_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    let widget = match model.screen_state() {
        ScreenState::Loading => FrameWidget {
            frame: None,
            placeholder: "Requesting permissions...",
        },
        ScreenState::PermissionDenied => FrameWidget {
            frame: None,
            placeholder: denied_message(model),
        },
        ScreenState::Live => FrameWidget {
            frame: preview,
            placeholder: "Waiting for camera...",
        },
        ScreenState::Preview => FrameWidget {
            frame: model.image.as_ref().map(|image| image.frame.as_ref()),
            placeholder: "No photo",
        },
    };
    f.render_widget(widget, frame_area);

    let status_area = Rect {
        x: area.x,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    let message = status_line(model, show_help);
    f.render_widget(StatusBar { message: &message }, status_area);
}

fn denied_message(model: &AppModel) -> &'static str {
    match (model.camera_permission, model.library_permission) {
        (PermissionStatus::Denied, PermissionStatus::Denied) => {
            "Camera and media library access denied"
        }
        (PermissionStatus::Denied, _) => "Camera access denied",
        _ => "Media library access denied",
    }
}

fn status_line(model: &AppModel, show_help: bool) -> String {
    if show_help {
        return help_message(model.screen_state());
    }
    if let Some(status) = &model.status {
        return status.clone();
    }
    hint_message(model)
}

fn hint_message(model: &AppModel) -> String {
    match model.screen_state() {
        ScreenState::Loading => "Requesting permissions...".to_string(),
        ScreenState::PermissionDenied => "'q' quit".to_string(),
        ScreenState::Live => {
            let mut msg = format!(
                "[{} lens | flash {}] 'space' picture | 'f' flash | 'c' lens",
                model.settings.facing.display_name(),
                model.settings.flash.display_name(),
            );
            if model.photos_saved > 0 {
                msg.push_str(&format!(" | saved {}", model.photos_saved));
            }
            msg.push_str(" | 'h' help | 'q' quit");
            msg
        }
        ScreenState::Preview => "'s' save | 'd' discard | 'h' help | 'q' quit".to_string(),
    }
}

fn help_message(screen: ScreenState) -> String {
    match screen {
        ScreenState::Preview => {
            "s: Save to library | d: Discard | h: Toggle help | q/Ctrl+C: Quit".to_string()
        }
        _ => "space/p: Take picture | f: Toggle flash | c: Switch lens | h: Toggle help | q/Ctrl+C: Quit"
            .to_string(),
    }
}

/// Widget that renders a camera frame using half-block characters
struct FrameWidget<'a> {
    frame: Option<&'a CameraFrame>,
    placeholder: &'a str,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.frame else {
            let msg = self.placeholder;
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, ratatui::style::Style::default());
            }
            return;
        };

        if frame.width == 0 || frame.height == 0 || area.width == 0 || area.height == 0 {
            return;
        }

        // Each terminal cell displays 2 vertical pixels using half-blocks,
        // so the usable pixel height is twice the cell height.
        let frame_aspect = frame.width as f64 / frame.height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = frame.width as f64 / display_width.max(1) as f64;
        let y_scale = frame.height as f64 / (display_height.max(1) * 2) as f64;

        // Upper pixel goes to the foreground of '▀', lower to the background.
        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let top_color = sample_pixel(frame, src_x, src_y_top);
                let bottom_color = sample_pixel(frame, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }
    }
}

fn sample_pixel(frame: &CameraFrame, x: u32, y: u32) -> Color {
    let x = x.min(frame.width.saturating_sub(1));
    let y = y.min(frame.height.saturating_sub(1));
    let (r, g, b) = frame.pixel_rgb(x, y).unwrap_or((0, 0, 0));
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        // Render text, clipped to the bar on a char boundary
        let text: String = self.message.chars().take(area.width as usize).collect();

        buf.set_string(
            area.x,
            area.y,
            &text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
        );
    }
}
