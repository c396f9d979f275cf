//! Validator for reedline - keeps input open while LaTeX is unfinished

use reedline::{ValidationResult, Validator};

/// LaTeX validator for reedline
///
/// Requests continuation while brace groups are open or while more
/// environments have been begun than ended, so a pasted or typed
/// `\begin{itemize}` block is submitted as one piece.
pub struct LatexValidator;

impl LatexValidator {
    /// Create a new LaTeX validator
    pub fn new() -> Self {
        Self
    }

    /// Check brace and environment balance over the whole input
    fn is_balanced(&self, input: &str) -> bool {
        let mut brace_depth: i32 = 0;
        let mut begins: i32 = 0;
        let mut ends: i32 = 0;

        for line in input.lines() {
            let line = Self::strip_comment(line);

            begins += line.matches("\\begin{").count() as i32;
            ends += line.matches("\\end{").count() as i32;

            let mut escape_next = false;
            for ch in line.chars() {
                if escape_next {
                    escape_next = false;
                    continue;
                }
                match ch {
                    '\\' => escape_next = true,
                    '{' => brace_depth += 1,
                    '}' => brace_depth -= 1,
                    _ => {}
                }
            }
        }

        // Over-closing is the user's business; only hold input open
        brace_depth <= 0 && begins <= ends
    }

    /// Cut a line at its first unescaped `%`
    fn strip_comment(line: &str) -> &str {
        let mut escape_next = false;
        for (i, ch) in line.char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }
            match ch {
                '\\' => escape_next = true,
                '%' => return &line[..i],
                _ => {}
            }
        }
        line
    }
}

impl Default for LatexValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for LatexValidator {
    /// Validate input for completeness
    ///
    /// # Arguments
    /// * `line` - The input line to validate
    ///
    /// # Returns
    /// * `ValidationResult` - Whether the input is complete or needs continuation
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        // Empty input is valid
        if trimmed.is_empty() {
            return ValidationResult::Complete;
        }

        if !self.is_balanced(line) {
            return ValidationResult::Incomplete;
        }

        ValidationResult::Complete
    }
}
