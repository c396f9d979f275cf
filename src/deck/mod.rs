//! Beamer deck document model
//!
//! A deck is the unit beamsh edits: the preamble lines before
//! `\begin{document}` plus an ordered sequence of frames and loose body
//! lines (section commands, `\maketitle` and the like). Parsing is a
//! line-based scan for `\begin{frame}`/`\end{frame}`; rendering emits
//! the same layout back. No LaTeX compilation happens here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DeckError, Result};

/// One beamer frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Title given inline as `\begin{frame}{Title}`. Empty when absent.
    pub title: String,

    /// Body lines between `\begin{frame}` and `\end{frame}`.
    pub body: Vec<String>,
}

/// One piece of the document body, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A beamer frame.
    Frame(Frame),

    /// A line living between frames, such as `\section{...}`.
    Text(String),
}

/// An in-memory slide deck.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// File the deck was loaded from or saved to.
    path: Option<PathBuf>,

    /// Lines before `\begin{document}`.
    preamble: Vec<String>,

    /// Document body in source order.
    segments: Vec<Segment>,

    /// Unsaved changes flag.
    dirty: bool,
}

impl Frame {
    /// Create an empty frame with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
        }
    }

    /// Title to show in listings.
    ///
    /// Falls back to a `\frametitle{...}` body line when the frame was
    /// written without an inline title.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            return &self.title;
        }
        for line in &self.body {
            if let Some(rest) = line.trim_start().strip_prefix("\\frametitle") {
                if let Some(inner) = braced_argument(rest) {
                    return inner;
                }
            }
        }
        ""
    }
}

impl Deck {
    /// Create a new deck with a starter beamer preamble.
    pub fn new() -> Self {
        Self {
            path: None,
            preamble: vec![
                "\\documentclass{beamer}".to_string(),
                "\\usetheme{default}".to_string(),
                "\\title{}".to_string(),
                "\\author{}".to_string(),
                "\\date{\\today}".to_string(),
            ],
            segments: Vec::new(),
            dirty: false,
        }
    }

    /// Load a deck from a `.tex` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DeckError::FileNotFound(path.display().to_string()).into());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| DeckError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let mut deck = Self::parse(&text);
        deck.path = Some(path.to_path_buf());
        debug!(
            "Loaded {} ({} frames, {} preamble lines)",
            path.display(),
            deck.frame_count(),
            deck.preamble.len()
        );
        Ok(deck)
    }

    /// Parse deck text. Best-effort: an unclosed frame runs to the end of
    /// the document, and a file without `\begin{document}` is treated as
    /// all preamble.
    pub fn parse(text: &str) -> Self {
        enum State {
            Preamble,
            Body,
            InFrame(Frame),
            Done,
        }

        let mut deck = Deck {
            path: None,
            preamble: Vec::new(),
            segments: Vec::new(),
            dirty: false,
        };
        let mut state = State::Preamble;

        for line in text.lines() {
            let trimmed = line.trim_start();
            state = match state {
                State::Preamble => {
                    if trimmed.starts_with("\\begin{document}") {
                        State::Body
                    } else {
                        deck.preamble.push(line.to_string());
                        State::Preamble
                    }
                }
                State::Body => {
                    if trimmed.starts_with("\\end{document}") {
                        State::Done
                    } else if let Some(rest) = frame_opener(trimmed) {
                        State::InFrame(Frame {
                            title: frame_title(rest),
                            body: Vec::new(),
                        })
                    } else {
                        deck.segments.push(Segment::Text(line.to_string()));
                        State::Body
                    }
                }
                State::InFrame(mut frame) => {
                    if trimmed.starts_with("\\end{frame}") {
                        deck.segments.push(Segment::Frame(frame));
                        State::Body
                    } else if trimmed.starts_with("\\end{document}") {
                        // Unclosed frame: flush it rather than swallowing
                        // the document terminator into its body.
                        deck.segments.push(Segment::Frame(frame));
                        State::Done
                    } else {
                        frame.body.push(line.to_string());
                        State::InFrame(frame)
                    }
                }
                State::Done => break,
            };
        }

        if let State::InFrame(frame) = state {
            deck.segments.push(Segment::Frame(frame));
        }
        deck
    }

    /// Render the deck back to `.tex` text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.preamble {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\\begin{document}\n");
        for segment in &self.segments {
            match segment {
                Segment::Text(line) => {
                    out.push_str(line);
                    out.push('\n');
                }
                Segment::Frame(frame) => {
                    if frame.title.is_empty() {
                        out.push_str("\\begin{frame}\n");
                    } else {
                        out.push_str(&format!("\\begin{{frame}}{{{}}}\n", frame.title));
                    }
                    for line in &frame.body {
                        out.push_str(line);
                        out.push('\n');
                    }
                    out.push_str("\\end{frame}\n");
                }
            }
        }
        out.push_str("\\end{document}\n");
        out
    }

    /// Save to the deck's associated path.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(DeckError::NoPath)?;
        self.save_as(path)
    }

    /// Save to `path` and associate the deck with it.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render())
            .map_err(|e| DeckError::SaveFailed(format!("{}: {}", path.display(), e)))?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        debug!("Saved {} ({} frames)", path.display(), self.frame_count());
        Ok(())
    }

    /// File associated with the deck, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Associate the deck with a file without saving.
    pub fn set_path<P: AsRef<Path>>(&mut self, path: P) {
        self.path = Some(path.as_ref().to_path_buf());
    }

    /// Whether the deck has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the deck as modified.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Preamble lines.
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// Append a line to the preamble.
    pub fn push_preamble_line(&mut self, line: impl Into<String>) {
        self.preamble.push(line.into());
        self.dirty = true;
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Frame(_)))
            .count()
    }

    /// Iterate over frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Frame(frame) => Some(frame),
            Segment::Text(_) => None,
        })
    }

    /// Frame at `index` (zero-based).
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames().nth(index)
    }

    /// Mutable frame at `index`, or `FrameOutOfRange`.
    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame> {
        let count = self.frame_count();
        let frame = self
            .segments
            .iter_mut()
            .filter_map(|s| match s {
                Segment::Frame(frame) => Some(frame),
                Segment::Text(_) => None,
            })
            .nth(index);
        match frame {
            Some(frame) => Ok(frame),
            None => Err(DeckError::FrameOutOfRange { index, count }.into()),
        }
    }

    /// Append a new frame and return its index.
    pub fn add_frame(&mut self, title: impl Into<String>) -> usize {
        self.segments.push(Segment::Frame(Frame::new(title)));
        self.dirty = true;
        self.frame_count() - 1
    }

    /// Append body lines to the frame at `index`.
    pub fn append_to_frame(&mut self, index: usize, lines: &str) -> Result<()> {
        let frame = self.frame_mut(index)?;
        for line in lines.lines() {
            frame.body.push(line.to_string());
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove and return the frame at `index`.
    pub fn remove_frame(&mut self, index: usize) -> Result<Frame> {
        let count = self.frame_count();
        let position = self
            .segments
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Segment::Frame(_)))
            .map(|(i, _)| i)
            .nth(index);
        match position {
            Some(position) => {
                self.dirty = true;
                match self.segments.remove(position) {
                    Segment::Frame(frame) => Ok(frame),
                    Segment::Text(_) => unreachable!("position filtered to frames"),
                }
            }
            None => Err(DeckError::FrameOutOfRange { index, count }.into()),
        }
    }

    /// Total number of body lines across all frames.
    pub fn line_count(&self) -> usize {
        self.frames().map(|f| f.body.len()).sum()
    }

    /// One outline entry per frame: number, title, line count.
    pub fn outline(&self) -> Vec<String> {
        self.frames()
            .enumerate()
            .map(|(i, frame)| {
                let title = frame.display_title();
                let title = if title.is_empty() { "(untitled)" } else { title };
                format!("{:>3}. {} ({} lines)", i + 1, title, frame.body.len())
            })
            .collect()
    }
}

/// Match a `\begin{frame}` opener and return the text after it.
///
/// Rejects longer environment names such as `\begin{frameX}`.
fn frame_opener(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("\\begin{frame}")?;
    match rest.chars().next() {
        None | Some('{') | Some('[') | Some(' ') | Some('\t') | Some('%') => Some(rest),
        Some(_) => None,
    }
}

/// Extract the frame title from the text after `\begin{frame}`,
/// skipping an option group such as `[fragile]`.
fn frame_title(rest: &str) -> String {
    let rest = rest.trim_start();
    let rest = if rest.starts_with('[') {
        match rest.find(']') {
            Some(close) => rest[close + 1..].trim_start(),
            None => return String::new(),
        }
    } else {
        rest
    };
    braced_argument(rest).unwrap_or("").to_string()
}

/// Return the contents of a leading brace group, honoring nesting.
///
/// `{Intro to \texttt{rust}} rest` yields `Intro to \texttt{rust}`.
fn braced_argument(s: &str) -> Option<&str> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, '{')) => {}
        _ => return None,
    }
    let mut depth = 1usize;
    for (i, c) in chars {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[1..i]);
                }
            }
            _ => {}
        }
    }
    None
}
