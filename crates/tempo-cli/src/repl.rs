//! Interactive loop: stdin commands and session events, one logical thread.
//!
//! The loop selects over two sources: lines typed by the player and events
//! flowing back from the runtime's spawned tasks (engine responses, push
//! channel). Every pass ends with an output flush that prints log entries
//! appended since the last one and reprints the board when the position
//! changed.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tempo_core::{LogEntry, LogKind};
use tempo_session::{SessionEvent, SessionRuntime, Square};

use crate::board;

/// One parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Move { from: Square, to: Square },
    Reset,
    Board,
    Log,
    Clear,
    Status,
    Help,
    Quit,
    Empty,
}

/// Parse one input line. The error is a user-facing usage message.
pub fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ReplCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();
    match verb {
        "move" | "m" => parse_move(&rest),
        "reset" => Ok(ReplCommand::Reset),
        "board" | "b" => Ok(ReplCommand::Board),
        "log" | "l" => Ok(ReplCommand::Log),
        "clear" => Ok(ReplCommand::Clear),
        "status" | "s" => Ok(ReplCommand::Status),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Accepts `move e2e4` and `move e2 e4`.
fn parse_move(args: &[&str]) -> Result<ReplCommand, String> {
    const USAGE: &str = "usage: move <from><to>, e.g. 'move e2e4' or 'move e2 e4'";
    let (from, to) = match args {
        [pair] if pair.len() == 4 => pair.split_at(2),
        [from, to] => (*from, *to),
        _ => return Err(USAGE.to_string()),
    };
    let from: Square = from.parse().map_err(|_| USAGE.to_string())?;
    let to: Square = to.parse().map_err(|_| USAGE.to_string())?;
    Ok(ReplCommand::Move { from, to })
}

fn print_entry(entry: &LogEntry) {
    // Banner lines print raw; everything else gets its kind tag.
    if entry.kind == LogKind::Welcome {
        println!("{}", entry.message);
    } else {
        println!("[{}] {}", entry.kind, entry.message);
    }
}

fn print_help() {
    println!("commands:");
    println!("  move <from><to>  play a move (e.g. move e2e4)");
    println!("  reset            reset the board to the starting position");
    println!("  board            print the board");
    println!("  log              print the full session log");
    println!("  clear            clear the session log");
    println!("  status           probe engine readiness again");
    println!("  help             show this help");
    println!("  quit             exit");
}

/// The interactive session driver.
pub struct Repl {
    runtime: SessionRuntime,
    events_rx: mpsc::Receiver<SessionEvent>,
    log_cursor: usize,
    last_fen: String,
}

impl Repl {
    #[must_use]
    pub fn new(runtime: SessionRuntime, events_rx: mpsc::Receiver<SessionEvent>) -> Self {
        let last_fen = runtime.session().fen();
        Self {
            runtime,
            events_rx,
            log_cursor: 0,
            last_fen,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        // The startup probe runs off-loop; its outcome arrives as an event.
        self.runtime.spawn_readiness_probe();
        println!("{}", board::render(&self.last_fen));
        print_help();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                event = self.events_rx.recv() => {
                    // The runtime holds a sender, so the channel never closes
                    // from the producer side while we are running.
                    let Some(event) = event else { break };
                    self.runtime.dispatch(event);
                    self.flush_output();
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read stdin")? else {
                        break;
                    };
                    match parse_line(&line) {
                        Ok(ReplCommand::Quit) => break,
                        Ok(command) => self.apply(command),
                        Err(usage) => println!("{usage}"),
                    }
                    self.flush_output();
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, command: ReplCommand) {
        match command {
            ReplCommand::Empty | ReplCommand::Quit => {}
            ReplCommand::Move { from, to } => {
                self.runtime.dispatch(SessionEvent::MoveIntent { from, to });
            }
            ReplCommand::Reset => self.runtime.dispatch(SessionEvent::Reset),
            ReplCommand::Status => self.runtime.spawn_readiness_probe(),
            ReplCommand::Board => {
                let session = self.runtime.session();
                println!("{}", board::render(&session.fen()));
                println!("{} to move", session.turn());
            }
            ReplCommand::Log => {
                for entry in self.runtime.session().log().entries() {
                    print_entry(entry);
                }
            }
            ReplCommand::Clear => {
                self.runtime.dispatch(SessionEvent::ClearLog);
                self.log_cursor = 0;
            }
            ReplCommand::Help => print_help(),
        }
    }

    /// Print log entries appended since the last flush; reprint the board when
    /// the position changed underneath it.
    fn flush_output(&mut self) {
        let session = self.runtime.session();
        for entry in session.log().entries_after(self.log_cursor) {
            print_entry(entry);
        }
        self.log_cursor = session.log().len();

        let fen = session.fen();
        if fen != self.last_fen {
            self.last_fen = fen;
            println!("{}", board::render(&self.last_fen));
        }
    }
}
