//! beamsh - Beamer deck shell
//!
//! An interactive shell for building LaTeX Beamer slide decks, with
//! command completion, frame-by-frame editing, and an inline composer.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! beamsh talk.tex
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use beamsh::cli::CliInterface;
use beamsh::completion::SuggestionResolver;
use beamsh::config::Config;
use beamsh::deck::Deck;
use beamsh::editor::{Composer, EditorEngine, SharedState};
use beamsh::error::{DeckError, Result};
use beamsh::kb::{self, CommandKnowledgeBase};
use beamsh::parser::{Command, EditTarget, ShowTarget};
use beamsh::session::SessionStore;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the shell
///
/// # Returns
/// * `Result<()>` - Success or error
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    // Handle subcommands (version, completion, config)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli)
}

/// Initialize logging based on the effective configuration
///
/// Verbosity flags have already been folded into the config level.
fn initialize_logging(cli: &CliInterface) {
    let logging = &cli.config().logging;
    let level = logging.level.to_tracing_level();

    if let Some(path) = &logging.file_path {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            if logging.timestamps {
                subscriber.init();
            } else {
                subscriber.without_time().init();
            }
            return;
        }
        eprintln!("Warning: could not open log file {}", path.display());
    }

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

/// Build the completion knowledge base: built-ins plus user commands
fn build_knowledge_base(config: &Config) -> Arc<CommandKnowledgeBase> {
    let mut base = CommandKnowledgeBase::builtin();
    if let Some(path) = &config.completion.user_commands_file {
        match kb::load_user_entries(path) {
            Ok(entries) => {
                debug!("Merged {} user commands from {}", entries.len(), path.display());
                base.merge(entries);
            }
            Err(e) => warn!("Ignoring user commands file {}: {}", path.display(), e),
        }
    }
    Arc::new(base)
}

/// Run the interactive shell loop
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let config = cli.config().clone();
    let knowledge = build_knowledge_base(&config);
    let shared = SharedState::new();
    shared.set_color_enabled(config.editor.color_output);

    let mut workspace = Workspace::new(config.clone(), Arc::clone(&knowledge), shared.clone());

    // Startup deck: explicit argument wins over --resume.
    let startup_deck = cli
        .args()
        .deck
        .clone()
        .or_else(|| {
            if cli.args().resume {
                workspace.session.last_deck().map(Path::to_path_buf)
            } else {
                None
            }
        });
    if let Some(path) = startup_deck {
        match workspace.execute(Command::Open { path }) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    let mut engine = EditorEngine::new(shared, &config, knowledge)?;

    while engine.is_running() {
        let input = match engine.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let command = match engine.process_input(&input) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Exit => break,
            // The composer takes over the terminal, so it runs outside
            // the line editor rather than inside execute().
            Command::Compose => match workspace.compose() {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            },
            command => match workspace.execute(command) {
                Ok(Some(output)) => println!("{}", output),
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    if let Err(e) = engine.sync_history() {
        debug!("History flush failed: {}", e);
    }
    workspace.shutdown();

    println!("Goodbye!");
    Ok(())
}

/// The open deck and everything editing it needs.
struct Workspace {
    deck: Deck,
    /// 0-based index of the frame content lines go to.
    current_frame: Option<usize>,
    edit_target: EditTarget,
    session: SessionStore,
    config: Config,
    shared: SharedState,
    knowledge: Arc<CommandKnowledgeBase>,
}

impl Workspace {
    fn new(config: Config, knowledge: Arc<CommandKnowledgeBase>, shared: SharedState) -> Self {
        let session = if config.session.persist {
            SessionStore::load_or_default(&config.session.file_path)
        } else {
            SessionStore::new()
        };

        Self {
            deck: Deck::new(),
            current_frame: None,
            edit_target: EditTarget::Frame,
            session,
            config,
            shared,
            knowledge,
        }
    }

    /// Execute a parsed command and return its printable output.
    fn execute(&mut self, command: Command) -> Result<Option<String>> {
        match command {
            Command::New { title } => self.cmd_new(&title),
            Command::Open { path } => self.cmd_open(&path),
            Command::Save { path } => self.cmd_save(path),
            Command::Frame { title } => self.cmd_frame(&title),
            Command::Preamble => {
                self.edit_target = EditTarget::Preamble;
                self.sync_shared();
                Ok(Some("Editing the preamble".to_string()))
            }
            Command::Body { index } => self.cmd_body(index),
            Command::Show(target) => self.cmd_show(target),
            Command::Drop { index } => self.cmd_drop(index),
            Command::Help(topic) => Ok(Some(help_text(topic.as_deref()))),
            Command::Content(line) => self.cmd_content(&line),
            // Handled by the shell loop.
            Command::Compose | Command::Exit => Ok(None),
        }
    }

    fn cmd_new(&mut self, title: &str) -> Result<Option<String>> {
        let source = format!(
            "\\documentclass{{beamer}}\n\
             \\usetheme{{default}}\n\
             \\title{{{title}}}\n\
             \\author{{}}\n\
             \\date{{\\today}}\n\
             \\begin{{document}}\n\
             \\maketitle\n\
             \\end{{document}}\n"
        );
        self.deck = Deck::parse(&source);
        self.current_frame = None;
        self.edit_target = EditTarget::Frame;
        self.shared.set_deck_name(title.to_string());
        self.sync_shared();
        Ok(Some(format!("Created deck '{}'", title)))
    }

    fn cmd_open(&mut self, path: &Path) -> Result<Option<String>> {
        self.deck = Deck::load(path)?;
        let frames = self.deck.frame_count();
        self.current_frame = frames.checked_sub(1);
        self.edit_target = EditTarget::Frame;
        self.touch_session(path);
        self.shared.set_deck_name(deck_display_name(&self.deck));
        self.sync_shared();
        Ok(Some(format!(
            "Opened {} ({} frames)",
            path.display(),
            frames
        )))
    }

    fn cmd_save(&mut self, path: Option<PathBuf>) -> Result<Option<String>> {
        match path {
            Some(path) => self.deck.save_as(&path)?,
            None => self.deck.save()?,
        }
        let saved = self
            .deck
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if let Some(path) = self.deck.path().map(Path::to_path_buf) {
            self.touch_session(&path);
        }
        self.shared.set_deck_name(deck_display_name(&self.deck));
        self.sync_shared();
        Ok(Some(format!("Saved {}", saved)))
    }

    fn cmd_frame(&mut self, title: &str) -> Result<Option<String>> {
        let index = self.deck.add_frame(title);
        self.current_frame = Some(index);
        self.edit_target = EditTarget::Frame;
        self.sync_shared();
        Ok(Some(format!("Frame {} '{}'", index + 1, title)))
    }

    fn cmd_body(&mut self, index: Option<usize>) -> Result<Option<String>> {
        let count = self.deck.frame_count();
        let target = match index {
            // 1-based on the command line.
            Some(n) => {
                if n > count {
                    return Err(DeckError::FrameOutOfRange {
                        index: n - 1,
                        count,
                    }
                    .into());
                }
                n - 1
            }
            None => count.checked_sub(1).ok_or(DeckError::NoActiveFrame)?,
        };
        self.current_frame = Some(target);
        self.edit_target = EditTarget::Frame;
        self.sync_shared();
        Ok(Some(format!("Editing frame {}", target + 1)))
    }

    fn cmd_content(&mut self, line: &str) -> Result<Option<String>> {
        match self.edit_target {
            EditTarget::Preamble => {
                self.deck.push_preamble_line(line);
            }
            EditTarget::Frame => {
                let index = self.current_frame.ok_or(DeckError::NoActiveFrame)?;
                self.deck.append_to_frame(index, line)?;
            }
        }
        self.sync_shared();
        Ok(None)
    }

    fn cmd_show(&mut self, target: ShowTarget) -> Result<Option<String>> {
        let output = match target {
            ShowTarget::Outline => {
                let outline = self.deck.outline();
                if outline.is_empty() {
                    "(no frames)".to_string()
                } else {
                    outline.join("\n")
                }
            }
            ShowTarget::Frames => self.render_frames(),
            ShowTarget::Commands => self.render_commands(),
            ShowTarget::Config => toml::to_string_pretty(&self.config)
                .unwrap_or_else(|e| format!("(config not printable: {})", e)),
            ShowTarget::Recent => {
                let recent = self.session.recent();
                if recent.is_empty() {
                    "(no recent decks)".to_string()
                } else {
                    recent
                        .iter()
                        .map(|r| format!("{}  ({})", r.path.display(), r.last_opened))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
        };
        Ok(Some(output))
    }

    fn render_frames(&self) -> String {
        if self.deck.frame_count() == 0 {
            return "(no frames)".to_string();
        }
        let mut out = Vec::new();
        for (i, frame) in self.deck.frames().enumerate() {
            let title = frame.display_title();
            let title = if title.is_empty() { "(untitled)" } else { title };
            out.push(format!("--- frame {} : {} ---", i + 1, title));
            for line in &frame.body {
                out.push(line.clone());
            }
        }
        out.join("\n")
    }

    fn render_commands(&self) -> String {
        self.knowledge
            .iter()
            .map(|entry| {
                format!(
                    "{:<18} {}  [{}]",
                    entry.token, entry.description, entry.category
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cmd_drop(&mut self, index: usize) -> Result<Option<String>> {
        // 1-based on the command line.
        let removed = self.deck.remove_frame(index - 1)?;
        let count = self.deck.frame_count();
        self.current_frame = match self.current_frame {
            Some(current) if current >= index - 1 => {
                if count == 0 {
                    None
                } else {
                    Some(current.saturating_sub(1).min(count - 1))
                }
            }
            other => other,
        };
        self.sync_shared();
        let title = removed.display_title().to_string();
        let title = if title.is_empty() {
            "(untitled)".to_string()
        } else {
            title
        };
        Ok(Some(format!("Dropped frame {} '{}'", index, title)))
    }

    /// Run the inline composer and append its result to the active frame.
    fn compose(&mut self) -> Result<Option<String>> {
        let index = self.current_frame.ok_or(DeckError::NoActiveFrame)?;
        let resolver = SuggestionResolver::new(Arc::clone(&self.knowledge));
        let mut composer = Composer::new(
            Arc::new(resolver),
            self.config.debounce(),
            self.config.completion.max_candidates,
        );

        match composer.run()? {
            Some(text) if !text.trim().is_empty() => {
                let lines = text.lines().count();
                self.deck.append_to_frame(index, &text)?;
                self.sync_shared();
                Ok(Some(format!(
                    "Added {} line{} to frame {}",
                    lines,
                    if lines == 1 { "" } else { "s" },
                    index + 1
                )))
            }
            Some(_) => Ok(Some("Nothing to add".to_string())),
            None => Ok(Some("Discarded".to_string())),
        }
    }

    fn touch_session(&mut self, path: &Path) {
        if !self.config.session.persist {
            return;
        }
        self.session.touch(path, self.config.session.recent_limit);
        if let Err(e) = self.session.save(&self.config.session.file_path) {
            warn!("Could not save session state: {}", e);
        }
    }

    /// Persist session state on exit.
    fn shutdown(&mut self) {
        if !self.config.session.persist {
            return;
        }
        if let Err(e) = self.session.save(&self.config.session.file_path) {
            warn!("Could not save session state: {}", e);
        }
    }

    /// Push deck state into the prompt's shared view.
    fn sync_shared(&self) {
        self.shared.set_frame_count(self.deck.frame_count());
        self.shared
            .set_current_frame(self.current_frame.map(|i| i + 1).unwrap_or(0));
        self.shared.set_edit_target(self.edit_target);
        self.shared.set_dirty(self.deck.is_dirty());
    }
}

/// Display name for the prompt: file stem, falling back to the preamble
/// title.
fn deck_display_name(deck: &Deck) -> String {
    if let Some(stem) = deck
        .path()
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
    {
        return stem;
    }
    for line in deck.preamble() {
        if let Some(rest) = line.trim_start().strip_prefix("\\title{") {
            if let Some(title) = rest.strip_suffix('}') {
                if !title.is_empty() {
                    return title.to_string();
                }
            }
        }
    }
    "untitled".to_string()
}

/// Help text for the shell, optionally narrowed to one command.
fn help_text(topic: Option<&str>) -> String {
    let entries: &[(&str, &str)] = &[
        ("new TITLE", "Start a new deck with the given title"),
        ("open PATH", "Load a deck from a .tex file"),
        ("save [PATH]", "Save the deck, optionally to a new path"),
        ("frame TITLE", "Start a new frame and edit its body"),
        ("preamble", "Send content lines to the preamble"),
        ("body [N]", "Send content lines to frame N (default: last)"),
        ("compose", "Open the inline frame composer"),
        (
            "show WHAT",
            "Show outline, frames, commands, config, or recent",
        ),
        ("drop N", "Delete frame N"),
        ("help [COMMAND]", "Show this help or one command"),
        ("exit", "Leave the shell"),
        (
            "(anything else)",
            "A LaTeX line, appended to the current edit target",
        ),
    ];

    if let Some(topic) = topic {
        for (usage, description) in entries {
            if usage.split_whitespace().next() == Some(topic) {
                return format!("{:<16} {}", usage, description);
            }
        }
        return format!("No help for '{}'. Try 'help'.", topic);
    }

    entries
        .iter()
        .map(|(usage, description)| format!("  {:<16} {}", usage, description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_workspace() -> Workspace {
        let mut config = Config::default();
        config.session.persist = false;
        config.history.persist = false;
        Workspace::new(
            config,
            Arc::new(CommandKnowledgeBase::builtin()),
            SharedState::new(),
        )
    }

    #[test]
    fn test_new_deck_sets_title() {
        let mut ws = test_workspace();
        let output = ws.execute(Command::New { title: "My Talk".to_string() }).unwrap();
        assert_eq!(output, Some("Created deck 'My Talk'".to_string()));
        assert!(ws.deck.preamble().iter().any(|l| l == "\\title{My Talk}"));
        assert_eq!(ws.deck.frame_count(), 0);
    }

    #[test]
    fn test_frame_then_content_appends_to_body() {
        let mut ws = test_workspace();
        ws.execute(Command::Frame { title: "Intro".to_string() }).unwrap();
        ws.execute(Command::Content("\\item one".to_string())).unwrap();
        ws.execute(Command::Content("\\item two".to_string())).unwrap();

        let frame = ws.deck.frame(0).unwrap();
        assert_eq!(frame.body, vec!["\\item one", "\\item two"]);
        assert_eq!(ws.shared.get_current_frame(), 1);
        assert!(ws.shared.is_dirty());
    }

    #[test]
    fn test_content_without_frame_is_an_error() {
        let mut ws = test_workspace();
        assert!(ws.execute(Command::Content("\\item stray".to_string())).is_err());
    }

    #[test]
    fn test_preamble_target_takes_content() {
        let mut ws = test_workspace();
        ws.execute(Command::Preamble).unwrap();
        ws.execute(Command::Content("\\usepackage{tikz}".to_string())).unwrap();
        assert!(ws.deck.preamble().iter().any(|l| l == "\\usepackage{tikz}"));
        assert_eq!(ws.shared.get_edit_target(), EditTarget::Preamble);
    }

    #[test]
    fn test_body_switches_frames_one_based() {
        let mut ws = test_workspace();
        ws.execute(Command::Frame { title: "A".to_string() }).unwrap();
        ws.execute(Command::Frame { title: "B".to_string() }).unwrap();

        ws.execute(Command::Body { index: Some(1) }).unwrap();
        ws.execute(Command::Content("into A".to_string())).unwrap();
        assert_eq!(ws.deck.frame(0).unwrap().body, vec!["into A"]);

        assert!(ws.execute(Command::Body { index: Some(5) }).is_err());
    }

    #[test]
    fn test_body_without_frames_is_an_error() {
        let mut ws = test_workspace();
        assert!(ws.execute(Command::Body { index: None }).is_err());
    }

    #[test]
    fn test_drop_adjusts_current_frame() {
        let mut ws = test_workspace();
        ws.execute(Command::Frame { title: "A".to_string() }).unwrap();
        ws.execute(Command::Frame { title: "B".to_string() }).unwrap();
        ws.execute(Command::Frame { title: "C".to_string() }).unwrap();

        let output = ws.execute(Command::Drop { index: 2 }).unwrap();
        assert_eq!(output, Some("Dropped frame 2 'B'".to_string()));
        assert_eq!(ws.deck.frame_count(), 2);
        // Current frame was C (index 2), shifted down by the removal.
        assert_eq!(ws.current_frame, Some(1));

        ws.execute(Command::Drop { index: 1 }).unwrap();
        ws.execute(Command::Drop { index: 1 }).unwrap();
        assert_eq!(ws.current_frame, None);
        assert!(ws.execute(Command::Drop { index: 1 }).is_err());
    }

    #[test]
    fn test_show_outline_and_frames() {
        let mut ws = test_workspace();
        assert_eq!(
            ws.execute(Command::Show(ShowTarget::Outline)).unwrap(),
            Some("(no frames)".to_string())
        );

        ws.execute(Command::Frame { title: "Intro".to_string() }).unwrap();
        ws.execute(Command::Content("\\pause".to_string())).unwrap();

        let outline = ws.execute(Command::Show(ShowTarget::Outline)).unwrap().unwrap();
        assert!(outline.contains("Intro"));
        assert!(outline.contains("1 lines"));

        let frames = ws.execute(Command::Show(ShowTarget::Frames)).unwrap().unwrap();
        assert!(frames.contains("--- frame 1 : Intro ---"));
        assert!(frames.contains("\\pause"));
    }

    #[test]
    fn test_show_commands_lists_knowledge_base() {
        let mut ws = test_workspace();
        let listing = ws.execute(Command::Show(ShowTarget::Commands)).unwrap().unwrap();
        assert!(listing.contains("\\frametitle"));
        assert!(listing.contains("\\begin"));
    }

    #[test]
    fn test_show_recent_empty() {
        let mut ws = test_workspace();
        assert_eq!(
            ws.execute(Command::Show(ShowTarget::Recent)).unwrap(),
            Some("(no recent decks)".to_string())
        );
    }

    #[test]
    fn test_save_and_reopen_round_trip() {
        let dir = std::env::temp_dir().join("beamsh_main_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("talk.tex");

        let mut ws = test_workspace();
        ws.execute(Command::New { title: "Talk".to_string() }).unwrap();
        ws.execute(Command::Frame { title: "One".to_string() }).unwrap();
        ws.execute(Command::Content("\\item hi".to_string())).unwrap();
        ws.execute(Command::Save { path: Some(path.clone()) }).unwrap();
        assert!(!ws.deck.is_dirty());

        let mut ws2 = test_workspace();
        let output = ws2.execute(Command::Open { path: path.clone() }).unwrap().unwrap();
        assert!(output.contains("1 frames"));
        assert_eq!(ws2.deck.frame(0).unwrap().body, vec!["\\item hi"]);
        // Opening lands on the last frame.
        assert_eq!(ws2.current_frame, Some(0));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_open_missing_file_is_an_error() {
        let mut ws = test_workspace();
        assert!(ws
            .execute(Command::Open {
                path: PathBuf::from("/nonexistent/deck.tex")
            })
            .is_err());
    }

    #[test]
    fn test_deck_display_name_prefers_file_stem() {
        let mut deck = Deck::new();
        assert_eq!(deck_display_name(&deck), "untitled");
        deck.set_path("slides/talk.tex");
        assert_eq!(deck_display_name(&deck), "talk");
    }

    #[test]
    fn test_deck_display_name_falls_back_to_title() {
        let deck = Deck::parse("\\documentclass{beamer}\n\\title{Big Talk}\n\\begin{document}\n\\end{document}\n");
        assert_eq!(deck_display_name(&deck), "Big Talk");
    }

    #[test]
    fn test_help_topics() {
        assert!(help_text(None).contains("compose"));
        assert!(help_text(Some("frame")).contains("frame TITLE"));
        assert!(help_text(Some("bogus")).contains("No help"));
    }
}
