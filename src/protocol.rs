use std::io::{self, BufRead, Write};

use crate::board::{Side, Snapshot, Square};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;

/// Line protocol for host processes that feed positions over a pipe.
pub struct ProtocolEngine {
    snapshot: Snapshot,
    engine: Engine,
}

impl Default for ProtocolEngine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl ProtocolEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { snapshot: Snapshot::start(), engine: Engine::new(config) }
    }

    pub fn snapshot(&self) -> &Snapshot { &self.snapshot }

    fn cmd_newgame(&mut self) {
        self.engine.reset();
        self.snapshot = Snapshot::start();
    }

    fn cmd_position(&mut self, args: &str) -> Result<(), EngineError> {
        // 'position startpos' or 'position <64 cells>'
        let args = args.trim();
        self.snapshot = if args == "startpos" { Snapshot::start() } else { args.parse()? };
        Ok(())
    }

    fn cmd_play(&mut self, args: &str) -> Result<(), EngineError> {
        let mut tokens = args.split_whitespace();
        let side: Side = tokens.next().unwrap_or_default().parse()?;
        let square: Square = tokens.next().unwrap_or_default().parse()?;
        self.snapshot = self.snapshot.play(side, square)?;
        Ok(())
    }

    /// Computes and plays a move for `side`; `None` is a pass.
    fn cmd_go(&mut self, args: &str) -> Result<Option<Square>, EngineError> {
        let side: Side = args.trim().parse()?;
        let mv = self.engine.compute_move(&self.snapshot, side)?;
        if let Some(sq) = mv {
            self.snapshot = self.snapshot.play(side, sq)?;
        }
        Ok(mv)
    }

    /// Handles one command line. Returns false on `quit`; write failures on
    /// `out` are returned so a closed pipe ends the loop.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() { return Ok(true); }
        let result = match line {
            "isready" => { writeln!(out, "readyok")?; Ok(()) }
            "newgame" | "reset" => { self.cmd_newgame(); Ok(()) }
            "show" => { write!(out, "{}", self.snapshot)?; Ok(()) }
            "quit" => return Ok(false),
            _ => {
                if let Some(rest) = line.strip_prefix("position ") { self.cmd_position(rest) }
                else if let Some(rest) = line.strip_prefix("play ") { self.cmd_play(rest) }
                else if let Some(rest) = line.strip_prefix("go ") {
                    match self.cmd_go(rest) {
                        Ok(Some(sq)) => { writeln!(out, "bestmove {sq}")?; Ok(()) }
                        Ok(None) => { writeln!(out, "bestmove pass")?; Ok(()) }
                        Err(e) => Err(e),
                    }
                }
                else { writeln!(out, "error unknown command '{line}'")?; Ok(()) }
            }
        };
        if let Err(e) = result {
            writeln!(out, "error {e}")?;
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?, out)? { break; }
        }
        Ok(())
    }

    pub fn run_stdio(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_loop(stdin.lock(), &mut stdout)
    }
}
