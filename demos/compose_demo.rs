//! Compose a small dashboard and paint it to the terminal once.
//!
//! Run with `RUST_LOG=debug cargo run --example compose_demo` to see the
//! compositor's diagnostics.

use std::io;
use std::sync::Arc;

use inkgrid::{
    ClipRegion, Compositor, CompositorConfig, OutputBuffer, PixelRange, Point, TransformRegistry,
    TransformSlot,
};

fn boxed(width: usize) -> impl Fn(&str, usize) -> String + Send + Sync {
    move |line, _| format!("\x1b[2m│\x1b[22m {line:<width$} \x1b[2m│\x1b[22m")
}

fn main() -> inkgrid::Result<()> {
    env_logger::init();

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let registry = TransformRegistry::new();
    let config = CompositorConfig::default().with_size(cols, rows.saturating_sub(1));
    let mut compositor = Compositor::with_registry(config, registry.clone());

    compositor.write(0, 0, "\x1b[1m\x1b[36minkgrid\x1b[39m\x1b[22m compositor demo", Vec::new());

    // A panel whose body is clipped to four columns of text
    compositor.clip(ClipRegion::rect(0, 2, 24, 4));
    compositor.write(0, 2, "\x1b[2m┌──────────────────────┐\x1b[22m", Vec::new());
    compositor.write(
        0,
        3,
        "status: \x1b[32mready\x1b[39m\nqueue: 3 jobs\nwide: 日本語テキスト overflowing",
        vec![Arc::new(boxed(20))],
    );
    compositor.unclip();

    // Overlapping panel painted later wins
    compositor.write(18, 4, "\x1b[43m\x1b[30m popup \x1b[39m\x1b[49m", Vec::new());

    // Highlight the title with a pixel transform owned by a slot
    let mut highlight = TransformSlot::new(registry);
    let title = PixelRange::new(Point::new(0, 0), Point::new(6, 0))?;
    highlight.sync(title, 1, |s| format!("\x1b[7m{s}\x1b[27m"));

    let frame = compositor.get();
    log::info!("composited {} rows", frame.height);

    let mut out = OutputBuffer::new();
    out.write_frame(&frame)?;
    out.move_cursor(0, rows.saturating_sub(1))?;
    out.show_cursor()?;
    out.flush_to(&mut io::stdout())
}
