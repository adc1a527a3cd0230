use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::element::Document;
use crate::event::Event;
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::Rgb;

fn ct(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Cursor and colour state of the terminal while a frame is being written.
struct Pen {
    next: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Pen {
    fn new() -> Self {
        Self {
            next: None,
            fg: None,
            bg: None,
        }
    }

    fn draw(&mut self, out: &mut impl Write, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.next != Some((x, y)) {
            queue!(out, cursor::MoveTo(x, y))?;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(ct(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(ct(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        queue!(out, Print(cell.char))?;
        let width = char_width(cell.char).max(1) as u16;
        self.next = Some((x.saturating_add(width), y));
        Ok(())
    }
}

/// Raw-mode terminal that paints a [`Document`] with double buffering.
///
/// Mouse capture is enabled for the lifetime of the value; dropping it
/// restores the terminal.
pub struct Terminal {
    stdout: io::Stdout,
    front: Buffer,
    back: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("[term] opened {}x{}", width, height);
        Ok(Self {
            stdout,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
        })
    }

    /// Size of the last painted frame.
    pub fn size(&self) -> (u16, u16) {
        (self.front.width(), self.front.height())
    }

    /// Wait for terminal input and convert it into document events.
    ///
    /// With `timeout` of `None` this blocks until at least one event arrives.
    /// Events with no document counterpart (keys, focus) are returned in the
    /// second vector untouched.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<(Vec<Event>, Vec<CrosstermEvent>)> {
        let ready = match timeout {
            Some(dur) => event::poll(dur)?,
            None => true,
        };
        if !ready {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut raw = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            raw.push(event::read()?);
        }

        let mut events = Vec::with_capacity(raw.len());
        let mut other = Vec::new();
        for ev in raw {
            match Event::from_crossterm(&ev) {
                Some(converted) => events.push(converted),
                None => other.push(ev),
            }
        }
        Ok((events, other))
    }

    /// Paint `document` at the current terminal size and write the cells that
    /// changed since the previous frame.
    pub fn render(&mut self, document: &Document) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            log::debug!("[term] resized to {}x{}", width, height);
            self.front = Buffer::new(width, height);
            self.back = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }
        document.set_viewport(Rect::from_size(width, height));

        self.back.clear();
        document.render(&mut self.back);

        let mut pen = Pen::new();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        for (x, y, cell) in self.back.diff(&self.front) {
            if !cell.wide_continuation {
                pen.draw(&mut self.stdout, x, y, cell)?;
            }
        }
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
