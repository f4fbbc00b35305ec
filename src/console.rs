//! Line-oriented text console.
//!
//! Commands are read from stdin, one per line, optionally prefixed by a
//! numeric id. Each reply starts with `=` on success or `?` on failure,
//! followed by the id and the response text, and ends with a blank line.
//! Session events are printed after each reply as `# ...` lines.
//!
//! ## Commands
//!
//! - `name`, `version` - Program name and version
//! - `list_commands`, `known_command <cmd>`
//! - `quit` - Exit
//! - `play <row> <col>` - Place a stone for the player to move
//! - `valid <row> <col>` - Whether the player to move may play there
//! - `pass`, `undo`, `redo`
//! - `reset` (alias `clear_board`) - Start over
//! - `showboard`, `state` - Board as glyphs or as integers
//! - `territory`, `score`, `time`
//! - `save <path>`, `load <path>` - JSON session record
//!
//! A timer thread feeds one tick per second into the same queue as the input
//! lines, so ticks and commands never interleave. Ticks only count in speed
//! mode, including for a speed game loaded into a normal console.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::{Sender, unbounded};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::constants::TICK_INTERVAL_MS;
use crate::session::GameSession;
use crate::territory::territory_size;

/// The list of known console commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "known_command",
    "list_commands",
    "load",
    "name",
    "pass",
    "play",
    "quit",
    "redo",
    "reset",
    "save",
    "score",
    "showboard",
    "state",
    "territory",
    "time",
    "undo",
    "valid",
    "version",
];

/// Everything the command loop reacts to.
enum Input {
    Line(String),
    Tick,
    /// The reader has no more lines.
    Eof,
}

pub struct Console {
    session: GameSession,
    /// Settings for loaded games that the record does not carry.
    template: GameConfig,
    tick_interval: Duration,
}

impl Console {
    pub fn new(session: GameSession) -> Self {
        let template = session.config().clone();
        Self {
            session,
            template,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }

    /// Deliver clock ticks at `interval` instead of once per second.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run the command loop on stdin/stdout until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(BufReader::new(io::stdin()), &mut out)
    }

    /// Run the command loop on `input` until `quit` or end of input, writing
    /// replies and events to `out`.
    pub fn run_with<R>(&mut self, input: R, out: &mut impl Write) -> anyhow::Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = unbounded();
        spawn_reader(input, tx.clone());
        spawn_ticker(tx, self.tick_interval);

        self.write_events(out)?;
        for input in rx.iter() {
            let quit = match input {
                Input::Tick => {
                    let player = self.session.current_player();
                    self.session.tick(player);
                    false
                }
                Input::Line(line) => self.handle_line(&line, out)?,
                Input::Eof => true,
            };
            self.write_events(out)?;
            out.flush()?;
            if quit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one input line and write the reply. Returns `true` on `quit`.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(false);
        }

        let (id, command_line) = Self::parse_id(line);
        let parts: Vec<&str> = command_line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            return Ok(false);
        };
        let command = command.to_lowercase();

        let (success, message) = self.execute(&command, args);
        let prefix = if success { '=' } else { '?' };
        let id_str = id.map(|i| i.to_string()).unwrap_or_default();
        writeln!(out, "\n{prefix}{id_str} {message}\n")?;
        Ok(command == "quit")
    }

    fn write_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.session.take_events() {
            writeln!(out, "# {event}")?;
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "console command");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "play" => match parse_coords(args) {
                Ok((row, col)) => match self.session.make_move(row, col) {
                    Ok(captured) => (true, format!("captured {captured}")),
                    Err(err) => (false, err.to_string()),
                },
                Err(msg) => (false, msg),
            },

            "valid" => match parse_coords(args) {
                Ok((row, col)) => (true, self.session.is_move_valid(row, col).to_string()),
                Err(msg) => (false, msg),
            },

            "pass" => match self.session.pass_turn() {
                Ok(()) => (true, String::new()),
                Err(err) => (false, err.to_string()),
            },

            "undo" => {
                if self.session.undo() {
                    (true, String::new())
                } else {
                    (false, "cannot undo".to_string())
                }
            }

            "redo" => {
                if self.session.redo() {
                    (true, String::new())
                } else {
                    (false, "cannot redo".to_string())
                }
            }

            "reset" | "clear_board" => {
                self.session.reset();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.session.board())),

            "state" => {
                let rows: Vec<String> = self
                    .session
                    .get_current_state()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                (true, format!("\n{}", rows.join("\n")))
            }

            "territory" => {
                let territories = self.session.controlled_territories();
                let lines: Vec<String> = (1..=self.session.num_players())
                    .map(|p| format!("{}: {}", p, territory_size(&territories, p as u8)))
                    .collect();
                (true, lines.join("\n"))
            }

            "score" => (true, self.score_report()),

            "time" => {
                let times: Option<Vec<String>> = (1..=self.session.num_players())
                    .map(|p| self.session.remaining_time(p as u8).map(|t| format!("{p}: {t}s")))
                    .collect();
                match times {
                    Some(times) => (true, times.join("\n")),
                    None => (false, "not a speed game".to_string()),
                }
            }

            "save" => match args.first() {
                Some(path) => match self.save(Path::new(path)) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, format!("{err:#}")),
                },
                None => (false, "missing argument".to_string()),
            },

            "load" => match args.first() {
                Some(path) => match self.load(Path::new(path)) {
                    Ok(()) => (true, String::new()),
                    Err(err) => (false, format!("{err:#}")),
                },
                None => (false, "missing argument".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn score_report(&self) -> String {
        let mut lines: Vec<String> = self
            .session
            .player_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let player = (i + 1) as u8;
                format!(
                    "{name}: {} ({} captured)",
                    self.session.score(player).unwrap_or_default(),
                    self.session.captures(player).unwrap_or_default()
                )
            })
            .collect();
        if let Some(result) = self.session.final_score() {
            let winners: Vec<&str> = result
                .winners
                .iter()
                .filter_map(|&p| self.session.player_names().get(usize::from(p) - 1))
                .map(String::as_str)
                .collect();
            lines.push(format!("winner: {}", winners.join(" & ")));
        }
        lines.join("\n")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.session.to_json().context("failed to encode session")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let session = GameSession::from_json(&json, &self.template)
            .with_context(|| format!("failed to load {}", path.display()))?;
        self.session = session;
        Ok(())
    }
}

fn parse_coords(args: &[&str]) -> Result<(usize, usize), String> {
    let [row, col, ..] = args else {
        return Err("missing arguments".to_string());
    };
    match (row.parse(), col.parse()) {
        (Ok(row), Ok(col)) => Ok((row, col)),
        _ => Err("invalid coordinates".to_string()),
    }
}

fn spawn_reader<R>(input: R, tx: Sender<Input>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(l) => l,
                Err(err) => {
                    warn!(%err, "input closed");
                    break;
                }
            };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        if tx.send(Input::Eof).is_err() {
            debug!("command loop already stopped");
        }
    });
}

/// Ticks until the command loop has gone away.
fn spawn_ticker(tx: Sender<Input>, interval: Duration) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(Input::Tick).is_err() {
                break;
            }
        }
    });
}
