//! Interactive line editor built on reedline
//!
//! Wires the prompt, completer, highlighter, validator, and hinter into
//! a reedline instance with Tab-driven completion menus, and maps the
//! editor's signals into plain `Option<String>` lines for the shell loop.

use std::sync::Arc;

use reedline::{
    default_emacs_keybindings, DescriptionMode, Emacs, FileBackedHistory, IdeMenu, KeyCode,
    KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};

use crate::config::Config;
use crate::error::{BeamshError, Result};
use crate::kb::CommandKnowledgeBase;
use crate::parser::{Command, Parser};

use super::completer::LatexCompleter;
use super::highlighter::LatexHighlighter;
use super::hinter::LatexHinter;
use super::prompt::BeamshPrompt;
use super::shared_state::SharedState;
use super::validator::LatexValidator;

const COMPLETION_MENU_NAME: &str = "completion_menu";

/// Interactive editor for the shell loop
pub struct EditorEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Prompt reflecting the shared deck state
    prompt: BeamshPrompt,

    /// Parser for command parsing
    parser: Parser,

    /// Whether to continue running
    running: bool,
}

impl EditorEngine {
    /// Create a new editor engine
    ///
    /// # Arguments
    /// * `shared_state` - Shared state rendered by the prompt
    /// * `config` - Editor, completion, and history configuration
    /// * `kb` - Knowledge base backing completion
    ///
    /// # Returns
    /// * `Result<Self>` - New editor engine or error
    pub fn new(
        shared_state: SharedState,
        config: &Config,
        kb: Arc<CommandKnowledgeBase>,
    ) -> Result<Self> {
        let mut keybindings = default_emacs_keybindings();
        configure_completion_keybindings(&mut keybindings);
        let edit_mode = Box::new(Emacs::new(keybindings));

        let mut editor = Reedline::create()
            .with_edit_mode(edit_mode)
            .with_highlighter(Box::new(LatexHighlighter::new(
                config.editor.syntax_highlighting,
            )))
            .with_validator(Box::new(LatexValidator::new()))
            .with_ansi_colors(config.editor.color_output);

        if config.completion.enabled {
            let completer = LatexCompleter::new(kb, config.completion.max_candidates);
            editor = editor
                .with_completer(Box::new(completer))
                .with_menu(ReedlineMenu::EngineCompleter(create_completion_menu()));
        }

        if config.editor.show_hints {
            editor = editor.with_hinter(Box::new(LatexHinter::new()));
        }

        if config.history.persist {
            if let Ok(history) = FileBackedHistory::with_file(
                config.history.max_size,
                config.history.file_path.clone(),
            ) {
                editor = editor.with_history(Box::new(history));
            }
        }

        Ok(Self {
            editor,
            prompt: BeamshPrompt::new(shared_state),
            parser: Parser::new(),
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, an empty line on Ctrl-C,
    ///   or None on Ctrl-D
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) => Ok(Some(String::new())),
            Ok(Signal::CtrlD) => Ok(None),
            Err(err) => Err(BeamshError::Generic(format!("Read error: {}", err))),
        }
    }

    /// Process user input and parse into command
    pub fn process_input(&mut self, input: &str) -> Result<Command> {
        self.parser.parse(input)
    }

    /// Flush pending history entries to disk
    pub fn sync_history(&mut self) -> Result<()> {
        self.editor
            .sync_history()
            .map_err(|err| BeamshError::Generic(format!("History sync error: {}", err)))
    }

    /// Check if the shell loop should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the shell loop after the current iteration
    pub fn stop(&mut self) {
        self.running = false;
    }
}

/// Tab opens the menu and cycles forward; arrows fall back to line
/// movement when no menu is open.
fn configure_completion_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::SHIFT,
        KeyCode::BackTab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu(COMPLETION_MENU_NAME.to_string()),
            ReedlineEvent::MenuPrevious,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Down,
        ReedlineEvent::UntilFound(vec![ReedlineEvent::MenuDown, ReedlineEvent::Down]),
    );
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Up,
        ReedlineEvent::UntilFound(vec![ReedlineEvent::MenuUp, ReedlineEvent::Up]),
    );
}

fn create_completion_menu() -> Box<IdeMenu> {
    Box::new(
        IdeMenu::default()
            .with_name(COMPLETION_MENU_NAME)
            .with_description_mode(DescriptionMode::PreferRight)
            .with_padding(1)
            .with_max_completion_width(48)
            .with_min_description_width(24)
            .with_max_description_width(72),
    )
}
