//! Shell completion generation for beamsh
//!
//! Generates completion scripts for bash, zsh, and fish, with file
//! completion narrowed to `.tex` files for the deck argument.

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::CliArgs;
use crate::error::{BeamshError, Result};

/// Generate shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    match parse_shell(shell_name)? {
        Shell::Bash => generate_bash_completion(),
        Shell::Zsh => generate_zsh_completion(),
        Shell::Fish => generate_fish_completion(),
        _ => Err(BeamshError::Generic(
            "Unsupported shell. Supported shells: bash, zsh, fish".to_string(),
        )),
    }
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(BeamshError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        ))),
    }
}

/// Generate Bash completion with .tex file completion for the deck argument
fn generate_bash_completion() -> Result<()> {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(Shell::Bash, &mut cmd, "beamsh", &mut buffer);

    let basic_completion = String::from_utf8_lossy(&buffer);

    let custom_completion = format!(
        r#"{}

# Complete the deck argument with .tex files
_beamsh_enhanced() {{
    local cur prev words cword
    _init_completion || return

    # First positional argument is the deck file
    if [[ $cword -eq 1 && "$cur" != -* ]]; then
        COMPREPLY=($(compgen -f -X '!*.tex' -- "$cur") $(compgen -d -- "$cur"))
        return 0
    fi

    _beamsh "$@"
}}

complete -F _beamsh_enhanced beamsh
"#,
        basic_completion
    );

    print!("{}", custom_completion);
    Ok(())
}

/// Generate Zsh completion with .tex file completion for the deck argument
fn generate_zsh_completion() -> Result<()> {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(Shell::Zsh, &mut cmd, "beamsh", &mut buffer);

    let basic_completion = String::from_utf8_lossy(&buffer);

    let custom_completion = format!(
        r#"{}

# Complete the deck argument with .tex files
_beamsh_decks() {{
    _files -g '*.tex'
}}

_beamsh_enhanced() {{
    if (( CURRENT == 2 )) && [[ ${{words[CURRENT]}} != -* ]]; then
        _beamsh_decks
        return 0
    fi

    _beamsh "$@"
}}

compdef _beamsh_enhanced beamsh
"#,
        basic_completion
    );

    print!("{}", custom_completion);
    Ok(())
}

/// Generate Fish completion with .tex file completion for the deck argument
fn generate_fish_completion() -> Result<()> {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(Shell::Fish, &mut cmd, "beamsh", &mut buffer);

    let basic_completion = String::from_utf8_lossy(&buffer);

    let custom_completion = format!(
        r#"{}

# Complete the deck argument with .tex files
complete -c beamsh -n "__fish_is_first_arg" -k -a "(__fish_complete_suffix .tex)" -d "Deck file"
"#,
        basic_completion
    );

    print!("{}", custom_completion);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        assert!(matches!(parse_shell("bash"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("fish"), Ok(Shell::Fish)));
        assert!(parse_shell("invalid").is_err());
    }

    #[test]
    fn test_parse_shell_case_insensitive() {
        assert!(matches!(parse_shell("BASH"), Ok(Shell::Bash)));
        assert!(matches!(parse_shell("Zsh"), Ok(Shell::Zsh)));
        assert!(matches!(parse_shell("FiSh"), Ok(Shell::Fish)));
    }
}
