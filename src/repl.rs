//! Line-based REPL with rustyline
//!
//! Interactive mode: each line is one tape program, executed against a
//! session-persistent VM so the tape carries over between lines.

use std::path::PathBuf;

use owo_colors::OwoColorize;
use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, EditMode, Editor};

use crate::vm::{InputMode, VMConfig, VM};
use crate::{Result, NAME, VERSION};

/// REPL configuration
#[derive(Debug, Clone)]
pub struct REPLConfig {
    /// Prompt to display
    pub prompt: String,
    /// Enable VI mode
    pub vi_mode: bool,
    /// History file path
    pub history_file: Option<PathBuf>,
    /// Maximum history size
    pub history_size: usize,
}

impl Default for REPLConfig {
    fn default() -> Self {
        Self {
            prompt: ">>> ".into(),
            vi_mode: false,
            history_file: None,
            history_size: 1000,
        }
    }
}

/// Result of a REPL command
enum CommandResult {
    /// Keep reading lines
    Continue,
    /// User asked to leave
    Exit,
}

/// REPL for ZhiDai
///
/// Reads a line, interprets it, prints any error, repeats. The VM (and
/// with it the tape and pointer) lives for the whole session; `:reset`
/// clears it without restarting the process.
pub struct REPL {
    /// Configuration
    config: REPLConfig,
    /// rustyline editor
    editor: Editor<(), FileHistory>,
    /// Session VM
    vm: VM,
}

impl REPL {
    /// Create a new REPL
    pub fn new(vm_config: VMConfig) -> Result<Self> {
        Self::with_config(vm_config, REPLConfig::default())
    }

    /// Create with custom config
    pub fn with_config(vm_config: VMConfig, config: REPLConfig) -> Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .max_history_size(config.history_size)?
            .completion_type(CompletionType::List)
            .edit_mode(if config.vi_mode {
                EditMode::Vi
            } else {
                EditMode::Emacs
            })
            .build();

        let mut editor = Editor::with_config(rl_config)?;

        // Load history if file exists
        if let Some(ref history_file) = config.history_file {
            if history_file.exists() {
                let _ = editor.load_history(history_file);
            }
        }

        Ok(Self {
            config,
            editor,
            vm: VM::new_with_config(vm_config, InputMode::Interactive),
        })
    }

    /// Run the REPL
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} v{} ({})",
            NAME.cyan().bold(),
            VERSION,
            std::env::consts::OS
        );
        println!("Type :help for commands, :quit or Ctrl+D to exit.\n");

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());

                    if line.starts_with(':') {
                        match self.handle_command(line.trim()) {
                            CommandResult::Exit => break,
                            CommandResult::Continue => continue,
                        }
                    }

                    if let Err(e) = self.vm.interpret(line.as_bytes()) {
                        println!("{} {}", "Error:".red().bold(), e);
                    }
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl-D pressed
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C pressed
                    println!("(Interrupted)");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Save history
        if let Some(ref history_file) = self.config.history_file {
            let _ = self.editor.save_history(history_file);
        }

        Ok(())
    }

    /// Handle a `:`-command
    fn handle_command(&mut self, line: &str) -> CommandResult {
        match line {
            ":quit" | ":q" | ":exit" => CommandResult::Exit,
            ":reset" => {
                self.vm.reset();
                println!("Tape cleared.");
                CommandResult::Continue
            }
            ":help" | ":h" => {
                println!("Instructions:");
                println!("  +  increment current cell      -  decrement current cell");
                println!("  >  move pointer right          <  move pointer left");
                println!("  .  output current cell         ,  read one input byte");
                println!("  [  loop while cell is nonzero  ]  end of loop");
                println!("Anything else is a comment.\n");
                println!("Commands:");
                println!("  :help   show this help");
                println!("  :reset  zero the tape and pointer");
                println!("  :quit   leave the REPL");
                CommandResult::Continue
            }
            other => {
                println!("Unknown command: {other} (try :help)");
                CommandResult::Continue
            }
        }
    }
}
