//! Built-in command and environment tables.
//!
//! These tables seed every knowledge base before user files are merged.
//! Order matters: it is the order candidates appear in when a bare `\` is
//! typed, so the tables lead with the constructs a deck author reaches for
//! most (frames, structure, emphasis) and finish with symbol macros.

use super::{CommandEntry, EnvironmentVariant};

/// The full built-in table, in display order.
pub fn entries() -> Vec<CommandEntry> {
    let mut all = Vec::new();
    all.push(begin_entry());
    all.push(end_entry());
    all.extend(structure_entries());
    all.extend(beamer_entries());
    all.extend(text_entries());
    all.extend(reference_entries());
    all.extend(layout_entries());
    all.extend(math_entries());
    all.extend(symbol_entries());
    all
}

// ============================================================================
// Environments
// ============================================================================

/// `\begin` with its second-level variant table. Variant templates replace
/// the whole partial token, so each one regenerates its `\begin{...}` text.
fn begin_entry() -> CommandEntry {
    CommandEntry::starter(
        "\\begin",
        "\\begin{$1}\n$2\n\\end{$1}",
        "Open an environment",
        "environment",
        vec![
            EnvironmentVariant::new(
                "frame",
                "\\begin{frame}{$1}\n$2\n\\end{frame}",
                "A single slide",
            ),
            EnvironmentVariant::new(
                "itemize",
                "\\begin{itemize}\n\\item $1\n\\end{itemize}",
                "Bulleted list",
            ),
            EnvironmentVariant::new(
                "enumerate",
                "\\begin{enumerate}\n\\item $1\n\\end{enumerate}",
                "Numbered list",
            ),
            EnvironmentVariant::new(
                "description",
                "\\begin{description}\n\\item[$1] $2\n\\end{description}",
                "Labeled list",
            ),
            EnvironmentVariant::new(
                "block",
                "\\begin{block}{$1}\n$2\n\\end{block}",
                "Titled block",
            ),
            EnvironmentVariant::new(
                "alertblock",
                "\\begin{alertblock}{$1}\n$2\n\\end{alertblock}",
                "Highlighted block",
            ),
            EnvironmentVariant::new(
                "exampleblock",
                "\\begin{exampleblock}{$1}\n$2\n\\end{exampleblock}",
                "Example block",
            ),
            EnvironmentVariant::new(
                "columns",
                "\\begin{columns}\n\\begin{column}{0.5\\textwidth}\n$1\n\\end{column}\n\\begin{column}{0.5\\textwidth}\n$2\n\\end{column}\n\\end{columns}",
                "Two-column layout",
            ),
            EnvironmentVariant::new(
                "column",
                "\\begin{column}{$1\\textwidth}\n$2\n\\end{column}",
                "Single column",
            ),
            EnvironmentVariant::new(
                "figure",
                "\\begin{figure}\n\\centering\n$1\n\\end{figure}",
                "Floating figure",
            ),
            EnvironmentVariant::new(
                "table",
                "\\begin{table}\n\\centering\n$1\n\\end{table}",
                "Floating table",
            ),
            EnvironmentVariant::new(
                "tabular",
                "\\begin{tabular}{$1}\n$2\n\\end{tabular}",
                "Column-aligned rows",
            ),
            EnvironmentVariant::new(
                "center",
                "\\begin{center}\n$1\n\\end{center}",
                "Centered content",
            ),
            EnvironmentVariant::new(
                "equation",
                "\\begin{equation}\n$1\n\\end{equation}",
                "Numbered equation",
            ),
            EnvironmentVariant::new(
                "align",
                "\\begin{align}\n$1\n\\end{align}",
                "Aligned equations",
            ),
            EnvironmentVariant::new(
                "verbatim",
                "\\begin{verbatim}\n$1\n\\end{verbatim}",
                "Literal text",
            ),
            EnvironmentVariant::new(
                "quote",
                "\\begin{quote}\n$1\n\\end{quote}",
                "Quoted passage",
            ),
            EnvironmentVariant::new(
                "theorem",
                "\\begin{theorem}\n$1\n\\end{theorem}",
                "Theorem statement",
            ),
            EnvironmentVariant::new(
                "proof",
                "\\begin{proof}\n$1\n\\end{proof}",
                "Proof body",
            ),
            EnvironmentVariant::new(
                "definition",
                "\\begin{definition}\n$1\n\\end{definition}",
                "Definition block",
            ),
            EnvironmentVariant::new(
                "example",
                "\\begin{example}\n$1\n\\end{example}",
                "Example block",
            ),
        ],
    )
}

fn end_entry() -> CommandEntry {
    CommandEntry::ender("\\end", "\\end{$1}", "Close an environment", "environment")
}

// ============================================================================
// Document structure
// ============================================================================

fn structure_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain(
            "\\documentclass",
            "\\documentclass{$1}",
            "Document class declaration",
            "structure",
        ),
        CommandEntry::plain(
            "\\usepackage",
            "\\usepackage{$1}",
            "Load a package",
            "structure",
        ),
        CommandEntry::plain("\\usetheme", "\\usetheme{$1}", "Beamer theme", "structure"),
        CommandEntry::plain("\\title", "\\title{$1}", "Deck title", "structure"),
        CommandEntry::plain("\\subtitle", "\\subtitle{$1}", "Deck subtitle", "structure"),
        CommandEntry::plain("\\author", "\\author{$1}", "Author line", "structure"),
        CommandEntry::plain(
            "\\institute",
            "\\institute{$1}",
            "Institute line",
            "structure",
        ),
        CommandEntry::plain("\\date", "\\date{$1}", "Date line", "structure"),
        CommandEntry::plain(
            "\\maketitle",
            "\\maketitle",
            "Render the title page",
            "structure",
        ),
        CommandEntry::plain(
            "\\tableofcontents",
            "\\tableofcontents",
            "Outline slide content",
            "structure",
        ),
        CommandEntry::plain("\\section", "\\section{$1}", "Section heading", "structure"),
        CommandEntry::plain(
            "\\subsection",
            "\\subsection{$1}",
            "Subsection heading",
            "structure",
        ),
        CommandEntry::plain(
            "\\appendix",
            "\\appendix",
            "Start the appendix",
            "structure",
        ),
    ]
}

// ============================================================================
// Beamer frame commands
// ============================================================================

fn beamer_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain(
            "\\frametitle",
            "\\frametitle{$1}",
            "Title of the current frame",
            "beamer",
        ),
        CommandEntry::plain(
            "\\framesubtitle",
            "\\framesubtitle{$1}",
            "Subtitle of the current frame",
            "beamer",
        ),
        CommandEntry::plain(
            "\\titlepage",
            "\\titlepage",
            "Title page inside a frame",
            "beamer",
        ),
        CommandEntry::plain("\\pause", "\\pause", "Reveal the rest on the next step", "beamer"),
        CommandEntry::plain("\\item", "\\item $1", "List entry", "beamer"),
        CommandEntry::plain("\\alert", "\\alert{$1}", "Beamer alert emphasis", "beamer"),
        CommandEntry::plain(
            "\\structure",
            "\\structure{$1}",
            "Beamer structure emphasis",
            "beamer",
        ),
        CommandEntry::plain(
            "\\only",
            "\\only<$1>{$2}",
            "Show only on given overlays",
            "beamer",
        ),
        CommandEntry::plain(
            "\\onslide",
            "\\onslide<$1>",
            "Reveal from the given overlay",
            "beamer",
        ),
        CommandEntry::plain(
            "\\uncover",
            "\\uncover<$1>{$2}",
            "Uncover on given overlays",
            "beamer",
        ),
        CommandEntry::plain(
            "\\visible",
            "\\visible<$1>{$2}",
            "Visible on given overlays",
            "beamer",
        ),
        CommandEntry::plain(
            "\\hyperlink",
            "\\hyperlink{$1}{$2}",
            "Jump link to a target slide",
            "beamer",
        ),
    ]
}

// ============================================================================
// Text formatting
// ============================================================================

fn text_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain("\\textbf", "\\textbf{$1}", "Bold text", "text"),
        CommandEntry::plain("\\textit", "\\textit{$1}", "Italic text", "text"),
        CommandEntry::plain("\\texttt", "\\texttt{$1}", "Monospace text", "text"),
        CommandEntry::plain("\\emph", "\\emph{$1}", "Emphasized text", "text"),
        CommandEntry::plain("\\underline", "\\underline{$1}", "Underlined text", "text"),
        CommandEntry::plain(
            "\\textcolor",
            "\\textcolor{$1}{$2}",
            "Colored text",
            "text",
        ),
        CommandEntry::plain("\\textsc", "\\textsc{$1}", "Small caps", "text"),
        CommandEntry::plain("\\tiny", "\\tiny", "Smallest font size", "text"),
        CommandEntry::plain("\\small", "\\small", "Small font size", "text"),
        CommandEntry::plain("\\large", "\\large", "Large font size", "text"),
        CommandEntry::plain("\\Large", "\\Large", "Larger font size", "text"),
        CommandEntry::plain("\\huge", "\\huge", "Huge font size", "text"),
    ]
}

// ============================================================================
// References and inclusion
// ============================================================================

fn reference_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain("\\label", "\\label{$1}", "Reference label", "reference"),
        CommandEntry::plain("\\ref", "\\ref{$1}", "Reference a label", "reference"),
        CommandEntry::plain("\\cite", "\\cite{$1}", "Citation", "reference"),
        CommandEntry::plain("\\footnote", "\\footnote{$1}", "Footnote", "reference"),
        CommandEntry::plain("\\url", "\\url{$1}", "Clickable URL", "reference"),
        CommandEntry::plain("\\href", "\\href{$1}{$2}", "Hyperlink with text", "reference"),
        CommandEntry::plain(
            "\\includegraphics",
            "\\includegraphics[width=$1\\textwidth]{$2}",
            "Include an image",
            "reference",
        ),
        CommandEntry::plain("\\input", "\\input{$1}", "Inline another file", "reference"),
        CommandEntry::plain("\\include", "\\include{$1}", "Include another file", "reference"),
        CommandEntry::plain("\\caption", "\\caption{$1}", "Float caption", "reference"),
    ]
}

// ============================================================================
// Spacing and layout
// ============================================================================

fn layout_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain("\\vspace", "\\vspace{$1}", "Vertical space", "layout"),
        CommandEntry::plain("\\hspace", "\\hspace{$1}", "Horizontal space", "layout"),
        CommandEntry::plain("\\centering", "\\centering", "Center the enclosing block", "layout"),
        CommandEntry::plain("\\hfill", "\\hfill", "Horizontal fill", "layout"),
        CommandEntry::plain("\\vfill", "\\vfill", "Vertical fill", "layout"),
        CommandEntry::plain("\\newline", "\\newline", "Line break", "layout"),
        CommandEntry::plain("\\textwidth", "\\textwidth", "Text width length", "layout"),
        CommandEntry::plain("\\linewidth", "\\linewidth", "Line width length", "layout"),
    ]
}

// ============================================================================
// Math constructs
// ============================================================================

fn math_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain("\\frac", "\\frac{$1}{$2}", "Fraction", "math"),
        CommandEntry::plain("\\sqrt", "\\sqrt{$1}", "Square root", "math"),
        CommandEntry::plain("\\sum", "\\sum_{$1}^{$2}", "Summation", "math"),
        CommandEntry::plain("\\prod", "\\prod_{$1}^{$2}", "Product", "math"),
        CommandEntry::plain("\\int", "\\int_{$1}^{$2}", "Integral", "math"),
        CommandEntry::plain("\\lim", "\\lim_{$1}", "Limit", "math"),
        CommandEntry::plain("\\mathbb", "\\mathbb{$1}", "Blackboard bold", "math"),
        CommandEntry::plain("\\mathcal", "\\mathcal{$1}", "Calligraphic letters", "math"),
        CommandEntry::plain("\\text", "\\text{$1}", "Upright text in math", "math"),
        CommandEntry::plain("\\overline", "\\overline{$1}", "Overline", "math"),
        CommandEntry::plain("\\hat", "\\hat{$1}", "Hat accent", "math"),
        CommandEntry::plain("\\vec", "\\vec{$1}", "Vector arrow", "math"),
    ]
}

// ============================================================================
// Symbols
// ============================================================================

fn symbol_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::plain("\\alpha", "\\alpha", "Greek letter alpha", "symbol"),
        CommandEntry::plain("\\beta", "\\beta", "Greek letter beta", "symbol"),
        CommandEntry::plain("\\gamma", "\\gamma", "Greek letter gamma", "symbol"),
        CommandEntry::plain("\\delta", "\\delta", "Greek letter delta", "symbol"),
        CommandEntry::plain("\\epsilon", "\\epsilon", "Greek letter epsilon", "symbol"),
        CommandEntry::plain("\\theta", "\\theta", "Greek letter theta", "symbol"),
        CommandEntry::plain("\\lambda", "\\lambda", "Greek letter lambda", "symbol"),
        CommandEntry::plain("\\mu", "\\mu", "Greek letter mu", "symbol"),
        CommandEntry::plain("\\pi", "\\pi", "Greek letter pi", "symbol"),
        CommandEntry::plain("\\sigma", "\\sigma", "Greek letter sigma", "symbol"),
        CommandEntry::plain("\\phi", "\\phi", "Greek letter phi", "symbol"),
        CommandEntry::plain("\\omega", "\\omega", "Greek letter omega", "symbol"),
        CommandEntry::plain("\\infty", "\\infty", "Infinity", "symbol"),
        CommandEntry::plain("\\cdot", "\\cdot", "Centered dot", "symbol"),
        CommandEntry::plain("\\times", "\\times", "Multiplication sign", "symbol"),
        CommandEntry::plain("\\leq", "\\leq", "Less than or equal", "symbol"),
        CommandEntry::plain("\\geq", "\\geq", "Greater than or equal", "symbol"),
        CommandEntry::plain("\\neq", "\\neq", "Not equal", "symbol"),
        CommandEntry::plain("\\approx", "\\approx", "Approximately equal", "symbol"),
        CommandEntry::plain("\\rightarrow", "\\rightarrow", "Right arrow", "symbol"),
        CommandEntry::plain("\\Rightarrow", "\\Rightarrow", "Implication arrow", "symbol"),
        CommandEntry::plain("\\leftarrow", "\\leftarrow", "Left arrow", "symbol"),
        CommandEntry::plain("\\ldots", "\\ldots", "Ellipsis", "symbol"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_carries_common_environments() {
        let begin = begin_entry();
        let names: Vec<&str> = begin.variants().iter().map(|v| v.name.as_str()).collect();
        for expected in ["frame", "itemize", "enumerate", "block", "columns", "equation"] {
            assert!(names.contains(&expected), "missing variant {expected}");
        }
    }

    #[test]
    fn test_variant_templates_regenerate_their_begin() {
        for variant in begin_entry().variants() {
            assert!(
                variant.template.starts_with(&format!("\\begin{{{}}}", variant.name)),
                "variant {} does not open itself",
                variant.name
            );
            assert!(
                variant.template.ends_with(&format!("\\end{{{}}}", variant.name)),
                "variant {} does not close itself",
                variant.name
            );
        }
    }

    #[test]
    fn test_core_tokens_present() {
        let all = entries();
        let tokens: Vec<&str> = all.iter().map(|e| e.token.as_str()).collect();
        assert!(tokens.contains(&"\\frac"));
        assert!(tokens.contains(&"\\frametitle"));
        assert!(tokens.contains(&"\\begin"));
        assert!(tokens.contains(&"\\end"));
    }

    #[test]
    fn test_every_entry_has_description() {
        for entry in entries() {
            assert!(!entry.description.is_empty(), "{} lacks description", entry.token);
            assert!(!entry.category.is_empty(), "{} lacks category", entry.token);
        }
    }
}
