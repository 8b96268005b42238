//! Thin, swappable presentation seam.
//!
//! The learning core only ever hands a read-only [`Snapshot`] to a
//! [`FrameSink`] once per rendered frame, and (in the manual variant) polls
//! an [`IntentSource`] for a movement intent. Nothing here feeds state back
//! into the engine.

use std::{
    io::{BufRead, Write},
    time::{Duration, Instant},
};

use crate::{
    Result,
    world::{Arena, Point},
};

/// Read-only view of the world for one frame: agent position, hunger, and
/// active food positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step: usize,
    pub position: Point,
    pub hunger: f64,
    pub food: Vec<Point>,
}

/// Frame output seam. Implementations consume snapshots; they never write
/// back into the engine.
pub trait FrameSink {
    fn frame(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Discards every frame. Used for unrendered evaluation runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

/// Line-per-frame console renderer.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleSink {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        ConsoleSink { out }
    }
}

impl<W: Write> FrameSink for ConsoleSink<W> {
    fn frame(&mut self, snapshot: &Snapshot) -> Result<()> {
        writeln!(
            self.out,
            "step {:>6}  pos {:>10}  hunger {:>5.1}  food {}",
            snapshot.step,
            snapshot.position.to_string(),
            snapshot.hunger,
            snapshot.food.len()
        )?;
        Ok(())
    }
}

/// Full-arena ASCII renderer for the grid variant: one character per cell,
/// `A` for the agent, `*` for food.
pub struct AsciiGridSink<W: Write> {
    out: W,
    arena: Arena,
}

impl AsciiGridSink<std::io::Stdout> {
    pub fn stdout(arena: Arena) -> Self {
        AsciiGridSink {
            out: std::io::stdout(),
            arena,
        }
    }
}

impl<W: Write> AsciiGridSink<W> {
    pub fn new(out: W, arena: Arena) -> Self {
        AsciiGridSink { out, arena }
    }
}

impl<W: Write> FrameSink for AsciiGridSink<W> {
    fn frame(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut grid =
            vec![vec![b'.'; self.arena.width() as usize]; self.arena.height() as usize];
        for food in &snapshot.food {
            if self.arena.contains(*food) {
                grid[food.y as usize][food.x as usize] = b'*';
            }
        }
        if self.arena.contains(snapshot.position) {
            grid[snapshot.position.y as usize][snapshot.position.x as usize] = b'A';
        }

        writeln!(
            self.out,
            "step {}  hunger {:.1}  food {}",
            snapshot.step,
            snapshot.hunger,
            snapshot.food.len()
        )?;
        for row in grid {
            self.out.write_all(&row)?;
            self.out.write_all(b"\n")?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Fixed-rate frame pacing for rendered output.
///
/// Only the rendered evaluation episode and manual play are paced; the
/// training loop must never go through a limiter.
#[derive(Debug)]
pub struct FrameLimiter {
    frame: Duration,
    next: Option<Instant>,
}

impl FrameLimiter {
    /// Create a limiter for the given frames-per-second rate.
    pub fn new(fps: u32) -> Self {
        FrameLimiter {
            frame: Duration::from_secs(1) / fps.max(1),
            next: None,
        }
    }

    /// Sleep until the next frame deadline.
    pub fn pace(&mut self) {
        let now = Instant::now();
        match self.next {
            None => self.next = Some(now + self.frame),
            Some(deadline) => {
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                self.next = Some(deadline.max(now) + self.frame);
            }
        }
    }
}

/// A movement intent polled once per manual-play frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move by `(dx, dy)`, each component in `{-1, 0, 1}`.
    Move { dx: i32, dy: i32 },
    /// Stay put this frame.
    Idle,
    /// Stop the outer loop.
    Quit,
}

/// Input seam for the manual variant.
pub trait IntentSource {
    fn poll(&mut self) -> Result<Intent>;
}

/// Reads intents as single-character lines: `w`/`a`/`s`/`d` to move,
/// `.` (or an empty line) to idle, `q` to quit. End of input quits.
pub struct StdinIntents<R: BufRead> {
    input: R,
}

impl StdinIntents<std::io::BufReader<std::io::Stdin>> {
    pub fn stdin() -> Self {
        StdinIntents {
            input: std::io::BufReader::new(std::io::stdin()),
        }
    }
}

impl<R: BufRead> StdinIntents<R> {
    pub fn new(input: R) -> Self {
        StdinIntents { input }
    }
}

impl<R: BufRead> IntentSource for StdinIntents<R> {
    fn poll(&mut self) -> Result<Intent> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Intent::Quit);
        }
        match line.trim() {
            "" | "." => Ok(Intent::Idle),
            "a" | "l" => Ok(Intent::Move { dx: -1, dy: 0 }),
            "d" | "r" => Ok(Intent::Move { dx: 1, dy: 0 }),
            "w" | "u" => Ok(Intent::Move { dx: 0, dy: -1 }),
            "s" => Ok(Intent::Move { dx: 0, dy: 1 }),
            "q" => Ok(Intent::Quit),
            other => Err(crate::Error::ParseIntent {
                input: other.to_string(),
            }),
        }
    }
}
