//! Syntax highlighter for LaTeX input lines
//!
//! Styles backslash commands, environment names, inline math, comments,
//! and grouping characters. The rendered text is always exactly the
//! input; only styling differs.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Commands that shape the document rather than its content.
const STRUCTURE_COMMANDS: &[&str] = &[
    "begin",
    "end",
    "documentclass",
    "usepackage",
    "usetheme",
    "usecolortheme",
    "title",
    "subtitle",
    "author",
    "institute",
    "date",
    "maketitle",
    "titlepage",
    "section",
    "subsection",
    "subsubsection",
    "frametitle",
    "framesubtitle",
    "tableofcontents",
    "appendix",
];

/// LaTeX syntax highlighter for reedline
pub struct LatexHighlighter {
    enabled: bool,
}

impl LatexHighlighter {
    /// Create a new highlighter
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn is_structure(name: &str) -> bool {
        STRUCTURE_COMMANDS.contains(&name)
    }

    fn command_style(name: &str) -> Style {
        if Self::is_structure(name) {
            Color::Blue.bold().into()
        } else {
            Color::Green.into()
        }
    }

    fn highlight_line(line: &str) -> StyledText {
        let mut styled = StyledText::new();
        let mut plain = String::new();
        let mut math_buffer = String::new();
        let mut in_math = false;

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if in_math {
                math_buffer.push(ch);
                if ch == '$' {
                    styled.push((Color::Yellow.into(), math_buffer.clone()));
                    math_buffer.clear();
                    in_math = false;
                }
                i += 1;
                continue;
            }

            // Comments run to end of line; escaped \% never reaches here
            if ch == '%' {
                Self::flush(&mut styled, &mut plain);
                let comment: String = chars[i..].iter().collect();
                styled.push((Color::DarkGray.dimmed().into(), comment));
                break;
            }

            if ch == '$' {
                Self::flush(&mut styled, &mut plain);
                in_math = true;
                math_buffer.push(ch);
                i += 1;
                continue;
            }

            if ch == '\\' {
                Self::flush(&mut styled, &mut plain);
                match chars.get(i + 1) {
                    Some(&next) if next.is_alphabetic() => {
                        let mut j = i + 1;
                        while j < chars.len() && chars[j].is_alphabetic() {
                            j += 1;
                        }
                        let word: String = chars[i..j].iter().collect();
                        let name = &word[1..];
                        let style = Self::command_style(name);

                        // \begin{name} and \end{name}: style the whole group
                        if (name == "begin" || name == "end")
                            && chars.get(j) == Some(&'{')
                            && let Some(offset) = chars[j..].iter().position(|&c| c == '}')
                        {
                            let close = j + offset;
                            let env: String = chars[j + 1..close].iter().collect();
                            styled.push((style, word));
                            styled.push((Color::Cyan.into(), "{".to_string()));
                            styled.push((Color::Cyan.bold().into(), env));
                            styled.push((Color::Cyan.into(), "}".to_string()));
                            i = close + 1;
                            continue;
                        }

                        styled.push((style, word));
                        i = j;
                    }
                    Some(&next) => {
                        // Escaped special such as \\, \%, \$ or \{
                        styled.push((Color::Green.into(), format!("\\{next}")));
                        i += 2;
                    }
                    None => {
                        // Bare trailing backslash while a command is typed
                        styled.push((Color::Green.into(), "\\".to_string()));
                        i += 1;
                    }
                }
                continue;
            }

            match ch {
                '{' | '}' | '[' | ']' => {
                    Self::flush(&mut styled, &mut plain);
                    styled.push((Color::Cyan.into(), ch.to_string()));
                }
                '&' | '^' | '_' | '~' => {
                    Self::flush(&mut styled, &mut plain);
                    styled.push((Color::Magenta.into(), ch.to_string()));
                }
                _ => plain.push(ch),
            }
            i += 1;
        }

        Self::flush(&mut styled, &mut plain);
        if !math_buffer.is_empty() {
            // Unclosed math while typing
            styled.push((Color::Yellow.into(), math_buffer));
        }
        styled
    }

    fn flush(styled: &mut StyledText, plain: &mut String) {
        if !plain.is_empty() {
            styled.push((Style::default(), std::mem::take(plain)));
        }
    }
}

impl Default for LatexHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for LatexHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        if !self.enabled {
            let mut styled = StyledText::new();
            styled.push((Style::default(), line.to_string()));
            return styled;
        }
        Self::highlight_line(line)
    }
}
