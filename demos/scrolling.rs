//! Scrollable feed demo.
//!
//! A column of "expensive" cards, each wrapped in a lazy gate. Cards render
//! as dim placeholders until they come within a quarter viewport of the
//! window, then materialize. The header counts how many cards have been
//! seen so far.
//!
//! Run with: cargo run --example scrolling
//!
//! Keys: j/k or arrows scroll, PageUp/PageDown jump, q or Esc quits.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use lazygate::{GateConfig, LazyGate, Offset, ViewportGeometry};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Widget};
use ratatui::Terminal;

const CARD_COUNT: usize = 40;
const CARD_HEIGHT: u16 = 6;

fn make_card(index: usize, seen: Rc<Cell<usize>>) -> LazyGate {
    let mut counted = false;
    LazyGate::new(GateConfig::new().offsets(Offset::Percent(25)))
        .render_with(move |area, buf| {
            let body = format!("Rendered lazily as card {index} approached the window.");
            Paragraph::new(body)
                .block(Block::bordered().title(format!("card {index}")))
                .render(area, buf);
        })
        .on_change(move |virtualized| {
            if !virtualized && !counted {
                counted = true;
                seen.set(seen.get() + 1);
            }
        })
}

fn draw_feed(
    frame: &mut ratatui::Frame<'_>,
    gates: &mut [LazyGate],
    scroll: usize,
    seen: &Cell<usize>,
) {
    let area = frame.area();
    if area.height < 2 {
        return;
    }
    let header = Rect::new(area.x, area.y, area.width, 1);
    let feed = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
    let buf = frame.buffer_mut();

    Paragraph::new(format!(
        "lazygate demo | j/k scroll, q quit | cards seen: {}",
        seen.get()
    ))
    .style(Style::default().fg(Color::Cyan))
    .render(header, buf);

    for (index, gate) in gates.iter_mut().enumerate() {
        let region_top = index * CARD_HEIGHT as usize;
        gate.observe(ViewportGeometry::new(
            scroll,
            feed.height,
            region_top,
            CARD_HEIGHT,
        ));

        // Draw only the on-screen slice of the card.
        let top = region_top as i64 - scroll as i64;
        let bottom = top + i64::from(CARD_HEIGHT);
        if bottom <= 0 || top >= i64::from(feed.height) {
            continue;
        }
        let clipped_top = top.max(0) as u16;
        let clipped_bottom = bottom.min(i64::from(feed.height)) as u16;
        let rect = Rect::new(
            feed.x,
            feed.y + clipped_top,
            feed.width,
            clipped_bottom - clipped_top,
        );
        let _ = gate.render(rect, buf);
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    gates: &mut [LazyGate],
    seen: &Cell<usize>,
) -> io::Result<()> {
    let total_rows = CARD_COUNT * CARD_HEIGHT as usize;
    let mut scroll: usize = 0;

    loop {
        terminal.draw(|frame| draw_feed(frame, gates, scroll, seen))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let max_scroll = total_rows.saturating_sub(1);
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => scroll = (scroll + 1).min(max_scroll),
                KeyCode::Char('k') | KeyCode::Up => scroll = scroll.saturating_sub(1),
                KeyCode::PageDown => scroll = (scroll + 10).min(max_scroll),
                KeyCode::PageUp => scroll = scroll.saturating_sub(10),
                KeyCode::Char('g') => scroll = 0,
                KeyCode::Char('G') => scroll = max_scroll,
                _ => {}
            }
        }
    }
}

fn main() -> io::Result<()> {
    // Optional file log; ignore failures (an embedder may own the subscriber).
    let _ = lazygate::logging::init(&std::env::temp_dir().join("lazygate-demo.log"));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let seen = Rc::new(Cell::new(0usize));
    let mut gates: Vec<LazyGate> = (0..CARD_COUNT)
        .map(|index| make_card(index, Rc::clone(&seen)))
        .collect();

    let result = run(&mut terminal, &mut gates, &seen);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
