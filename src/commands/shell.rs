use arbor::shell::Shell;
use arbor::styling::println;

pub(crate) fn handle_shell_init(shell: Shell) {
    println!("{}", shell.init_snippet());
}
