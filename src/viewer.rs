// SPDX-License-Identifier: GPL-3.0-only

//! Terminal disparity viewer
//!
//! Renders each processed frame to the terminal using Unicode half-block
//! characters for improved vertical resolution, with a status bar on the
//! bottom line. Each frame blocks for the configured duration (or until a
//! key event), then the loop advances; 'q', Esc, or Ctrl+C stops.

use crate::config::ViewConfig;
use crate::constants::CameraIntrinsics;
use crate::errors::ViewerResult;
use crate::pipeline::{self, ProcessedFrame};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::RgbImage;
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// View every frame pair in a capture directory.
///
/// Frames are processed lazily inside the loop, so a load failure aborts
/// the run at the offending file.
pub fn view_directory(
    captured_dir: &Path,
    config: &ViewConfig,
    intrinsics: &CameraIntrinsics,
) -> ViewerResult<()> {
    let sources = pipeline::collect_frames(captured_dir)?;
    info!(count = sources.len(), "Found capture frames");

    with_terminal(|terminal| {
        for source in &sources {
            let frame = pipeline::process_frame(source, config, intrinsics, captured_dir)?;
            if !show_frame(terminal, &frame, Some(config.wait))? {
                break;
            }
        }
        Ok(())
    })
}

/// View the frames of a single npy file.
///
/// There is no per-frame timer here; each frame stays up until a key is
/// pressed.
pub fn view_file(
    path: &Path,
    config: &ViewConfig,
    intrinsics: &CameraIntrinsics,
) -> ViewerResult<()> {
    let frames = pipeline::process_file(path, config, intrinsics)?;

    with_terminal(|terminal| {
        for frame in &frames {
            if !show_frame(terminal, frame, None)? {
                break;
            }
        }
        Ok(())
    })
}

/// Run a viewer body with the terminal in raw mode + alternate screen,
/// restoring it afterwards whatever the body returns.
fn with_terminal<F>(body: F) -> ViewerResult<()>
where
    F: FnOnce(&mut Term) -> ViewerResult<()>,
{
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = body(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Draw one frame and block for `wait` (or indefinitely when None).
///
/// Returns false when the user asked to stop.
fn show_frame(terminal: &mut Term, frame: &ProcessedFrame, wait: Option<Duration>) -> ViewerResult<bool> {
    let status = build_status_message(frame);
    draw(terminal, frame, &status)?;

    let deadline = wait.map(|w| Instant::now() + w);
    loop {
        let timeout = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Ok(true);
                }
                remaining.min(Duration::from_millis(100))
            }
            None => Duration::from_millis(100),
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let quit = key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL));
                    return Ok(!quit);
                }
                Event::Resize(_, _) => draw(terminal, frame, &status)?,
                _ => {}
            }
        }
    }
}

fn draw(terminal: &mut Term, frame: &ProcessedFrame, status: &str) -> ViewerResult<()> {
    terminal.draw(|f| {
        let area = f.area();

        // Reserve bottom line for status
        let frame_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height.saturating_sub(1),
        };

        let widget = FrameWidget {
            image: &frame.display,
        };
        f.render_widget(widget, frame_area);

        let status_area = Rect {
            x: area.x,
            y: area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        f.render_widget(StatusBar { message: status }, status_area);
    })?;
    Ok(())
}

fn build_status_message(frame: &ProcessedFrame) -> String {
    let mut msg = frame.name.clone();
    if let Some(count) = frame.point_count {
        msg.push_str(&format!(" | {} points", count));
    }
    if let Some(last) = frame.saved.last() {
        msg.push_str(&format!(" | saved {}", last.display()));
    }
    msg.push_str(" | any key: next | 'q' quit");
    msg
}

/// Widget that renders an RGB image using half-block characters
struct FrameWidget<'a> {
    image: &'a RgbImage,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.image.width() == 0 || self.image.height() == 0 || area.width == 0 || area.height == 0
        {
            return;
        }

        // Calculate display dimensions maintaining aspect ratio.
        // Each terminal cell displays 2 vertical pixels using half-blocks.
        let image_aspect = self.image.width() as f64 / self.image.height() as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > image_aspect {
            // Terminal is wider - fit to height
            let h = term_height;
            let w = h * image_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let w = term_width;
            let h = w / image_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = self.image.width() as f64 / display_width.max(1) as f64;
        let y_scale = self.image.height() as f64 / (display_height.max(1) * 2) as f64;

        // Each terminal cell represents 2 vertical pixels:
        // - Upper half (▀) colored with fg
        // - Lower half colored with bg
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

                let top = sample_pixel(self.image, src_x, src_y_top);
                let bottom = sample_pixel(self.image, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top);
                    cell.set_bg(bottom);
                }
            }
        }
    }
}

fn sample_pixel(image: &RgbImage, x: u32, y: u32) -> Color {
    let x = x.min(image.width() - 1);
    let y = y.min(image.height() - 1);
    let [r, g, b] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        // Frame names come from file stems and may be multibyte; truncate
        // on a char boundary, never a byte index
        let text = match self.message.char_indices().nth(area.width as usize) {
            Some((idx, _)) => &self.message[..idx],
            None => self.message,
        };

        buf.set_string(
            area.x,
            area.y,
            text,
            ratatui::style::Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
        );
    }
}
