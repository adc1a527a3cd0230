use std::fs::File;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use synthbar::{HorizontalScrollbar, ScrollbarConfig, ScrollbarTheme, TuiHost, VerticalScrollbar};
use tuidom::{Color, Document, ElementId, Length, Placement, Rect, Style, Terminal};

const LINES: usize = 300;
const COLUMNS: usize = 240;

struct Panes {
    text: ElementId,
    right: ElementId,
    bottom: ElementId,
}

fn content() -> String {
    (0..LINES)
        .map(|row| {
            let mut line = format!("{row:>4} ");
            while line.len() < COLUMNS {
                line.push_str(&format!("col{:<4}", line.len()));
            }
            line.truncate(COLUMNS);
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text pane with a one-cell gutter on the right and along the bottom.
fn build(doc: &Document) -> Result<Panes, tuidom::DocumentError> {
    let text = doc.create_element("text");
    let right = doc.create_element("gutter-right");
    let bottom = doc.create_element("gutter-bottom");
    doc.set_text(text, content())?;
    doc.set_style(text, Style::new().foreground(Color::oklch(0.85, 0.02, 250.0)))?;
    for id in [text, right, bottom] {
        doc.append_child(doc.root(), id)?;
    }
    Ok(Panes {
        text,
        right,
        bottom,
    })
}

/// Size the panes for a `width` x `height` viewport. Returns the text pane's
/// visible columns and rows.
fn place(
    doc: &Document,
    panes: &Panes,
    width: u16,
    height: u16,
) -> Result<(u16, u16), tuidom::DocumentError> {
    let cols = width.saturating_sub(1);
    let rows = height.saturating_sub(1);
    doc.set_placement(
        panes.text,
        Placement::new()
            .width(Length::Cells(cols))
            .height(Length::Cells(rows)),
    )?;
    doc.set_placement(
        panes.right,
        Placement::new()
            .left(cols)
            .width(Length::Cells(1))
            .height(Length::Cells(rows)),
    )?;
    doc.set_placement(
        panes.bottom,
        Placement::new()
            .top(rows)
            .width(Length::Cells(cols))
            .height(Length::Cells(1)),
    )?;
    Ok((cols, rows))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("scroll.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let (width, height) = term.size();
    let doc = Document::new(Rect::from_size(width, height));
    let panes = build(&doc)?;
    let (mut cols, mut rows) = place(&doc, &panes, width, height)?;

    let theme = ScrollbarTheme::default();
    let host = TuiHost::new(doc.clone()).with_theme(ScrollbarTheme {
        thumb: theme.thumb.lighten(0.15),
        track_char: Some('│'),
        thumb_char: Some('┃'),
        ..theme.clone()
    });

    let text = panes.text;
    let pane = doc.clone();
    let vertical = VerticalScrollbar::new(
        host.clone(),
        panes.right,
        ScrollbarConfig::new(LINES as f64, rows.into())
            .min_thumb(1.0)
            .wheel_step(3.0)
            .on_scroll(move |value| {
                let _ = pane.update(text, |el| el.scroll_offset.1 = value.round() as u16);
            }),
    )?;

    let pane = doc.clone();
    let horizontal = HorizontalScrollbar::new(
        host.with_theme(ScrollbarTheme {
            track_char: Some('─'),
            thumb_char: Some('━'),
            ..theme
        }),
        panes.bottom,
        ScrollbarConfig::new(COLUMNS as f64, cols.into())
            .min_thumb(2.0)
            .wheel_step(4.0)
            .on_scroll(move |value| {
                let _ = pane.update(text, |el| el.scroll_offset.0 = value.round() as u16);
            }),
    )?;

    loop {
        term.render(&doc)?;

        let (events, raw) = term.poll(None)?;
        for event in &events {
            doc.dispatch(event);
        }

        let viewport = doc.viewport();
        let (w, h) = term.size();
        if (viewport.width, viewport.height) != (w, h) {
            log::info!("resized to {}x{}", w, h);
            (cols, rows) = place(&doc, &panes, w, h)?;
            vertical.set_visible_size(rows.into())?;
            horizontal.set_visible_size(cols.into())?;
            vertical.update(vertical.scroll_value())?;
            horizontal.update(horizontal.scroll_value())?;
        }

        for event in raw {
            let CrosstermEvent::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down => {
                    vertical.scroll_by(1.0)?;
                }
                KeyCode::Up => {
                    vertical.scroll_by(-1.0)?;
                }
                KeyCode::PageDown => {
                    vertical.scroll_by(f64::from(rows))?;
                }
                KeyCode::PageUp => {
                    vertical.scroll_by(-f64::from(rows))?;
                }
                KeyCode::Right => {
                    horizontal.scroll_by(4.0)?;
                }
                KeyCode::Left => {
                    horizontal.scroll_by(-4.0)?;
                }
                KeyCode::Home => {
                    vertical.scroll_to(0.0)?;
                    horizontal.scroll_to(0.0)?;
                }
                _ => {}
            }
        }
    }
}
