//! Shell integration.
//!
//! A child process can't change its parent shell's directory, so `arbor add`
//! and `arbor switch` print the target path on stdout and a shell function
//! wrapping the binary `cd`s into it.

/// Supported shells for `arbor shell init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

/// Subcommands whose stdout is a directory to change into.
pub const CD_SUBCOMMANDS: [&str; 3] = ["add", "switch", "sw"];

impl Shell {
    /// Shell code that defines an `arbor` function wrapping the binary.
    pub fn init_snippet(self) -> String {
        match self {
            Shell::Bash | Shell::Zsh => posix_snippet(self),
            Shell::Fish => fish_snippet(),
        }
    }
}

fn posix_snippet(shell: Shell) -> String {
    let cases = CD_SUBCOMMANDS.join("|");
    format!(
        r#"# arbor shell integration ({shell})
#
# Usage:
#   eval "$(arbor shell init {shell})"
#
# Wraps `arbor` so `arbor add` and `arbor switch` change the current directory.
# Use `command arbor ...` to call the binary directly.

arbor() {{
  case "$1" in
    {cases})
      for arg in "$@"; do
        if [[ "$arg" == "-h" || "$arg" == "--help" ]]; then
          command arbor "$@"
          return $?
        fi
      done

      local target
      target="$(command arbor "$@")" || return $?
      [[ -n "$target" ]] || return 1
      builtin cd -- "$target" || return $?
      ;;
    *)
      command arbor "$@"
      ;;
  esac
}}"#
    )
}

fn fish_snippet() -> String {
    let tests = CD_SUBCOMMANDS
        .iter()
        .map(|sub| format!("\"$sub\" = \"{sub}\""))
        .collect::<Vec<_>>()
        .join(" -o ");
    format!(
        r#"# arbor shell integration (fish)
#
# Usage:
#   arbor shell init fish | source
#
# Wraps `arbor` so `arbor add` and `arbor switch` change the current directory.
# Use `command arbor ...` to call the binary directly.

function arbor --wraps arbor --description 'arbor wrapper that follows add/switch'
    if test (count $argv) -ge 1
        set -l sub $argv[1]
        if test {tests}
            for arg in $argv
                if test "$arg" = "-h" -o "$arg" = "--help"
                    command arbor $argv
                    return $status
                end
            end

            # One line, so no `string collect`; `set` keeps arbor's exit status
            set -l target (command arbor $argv)
            or return $status
            if test -z "$target"
                return 1
            end
            cd -- "$target"
            return $status
        end
    end

    command arbor $argv
end"#
    )
}
