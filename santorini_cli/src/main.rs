use std::{
    cell::RefCell,
    io::{BufRead, Write},
    path::PathBuf,
    rc::Rc,
};

use anyhow::Context;
use clap::Parser;
use santorini_rules::{
    agent::{AgentKind, TurnInput, build_agent},
    board::Board,
    config::GameConfig,
    coord::{Coord, Direction},
    error::GameError,
    game::{Game, GameStatus},
    heuristic::PositionScore,
    history::TurnRecord,
    notation::{Position, parse_position},
    player::PlayerId,
    worker::WorkerId,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DIRECTION_LIST: &str = "(n, ne, e, se, s, sw, w, nw)";

#[derive(Parser, Debug)]
#[command(about = "Play Santorini in the terminal")]
struct CliArgs {
    /// Who plays white (A and B)
    #[arg(value_enum)]
    white: Option<AgentKind>,
    /// Who plays blue (Y and Z)
    #[arg(value_enum)]
    blue: Option<AgentKind>,

    /// Offer undo and redo before every turn
    #[arg(short = 'u', long)]
    undo_redo: bool,
    /// Show each player's position score
    #[arg(short = 's', long)]
    score: bool,
    /// Seed for random players
    #[arg(long)]
    seed: Option<u64>,
    /// YAML file with game settings. Flags win over the file.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
    /// Start from a position string instead of the standard opening
    #[arg(short = 'p', long)]
    position: Option<String>,
    /// Colour the board by level
    #[arg(long)]
    color: bool,
}

impl CliArgs {
    fn resolve_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(white) = self.white {
            config.white = white;
        }
        if let Some(blue) = self.blue {
            config.blue = blue;
        }
        config.undo_redo |= self.undo_redo;
        config.score |= self.score;
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// Reads a human's answers one line at a time.
struct LineInput<R: BufRead> {
    reader: R,
    last_direction: Option<Direction>,
}

impl<R: BufRead> LineInput<R> {
    fn new(reader: R) -> Self {
        LineInput {
            reader,
            last_direction: None,
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        println!("{prompt}");
        if let Err(e) = std::io::stdout().flush() {
            warn!(error = %e, "failed to flush stdout");
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(GameError::InputClosed),
            Ok(_) => Ok(line.trim().to_owned()),
            Err(e) => {
                warn!(error = %e, "failed to read input");
                Err(GameError::InputClosed)
            }
        }
    }

    fn ask_direction(&mut self, prompt: &str) -> Result<Direction, GameError> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<Direction>() {
                Ok(direction) => {
                    self.last_direction = Some(direction);
                    return Ok(direction);
                }
                Err(_) => println!("Not a valid direction"),
            }
        }
    }

    fn last_direction_name(&self) -> &'static str {
        self.last_direction.map(<&'static str>::from).unwrap_or("there")
    }
}

impl<R: BufRead> TurnInput for LineInput<R> {
    fn select_worker(&mut self, _board: &Board, _player: PlayerId) -> Result<WorkerId, GameError> {
        loop {
            let answer = self.ask("Select a worker to move")?;
            match answer.parse::<WorkerId>() {
                Ok(worker) => return Ok(worker),
                Err(_) => println!("Not a valid worker"),
            }
        }
    }

    fn move_direction(&mut self, _board: &Board, _worker: WorkerId) -> Result<Direction, GameError> {
        self.ask_direction(&format!("Select a direction to move {DIRECTION_LIST}"))
    }

    fn build_direction(
        &mut self,
        _board: &Board,
        _worker: WorkerId,
        _to: Coord,
    ) -> Result<Direction, GameError> {
        self.ask_direction(&format!("Select a direction to build {DIRECTION_LIST}"))
    }

    fn rejected(&mut self, error: &GameError) {
        debug!(%error, "rejected answer");
        match error {
            GameError::WrongWorker { .. } => println!("That is not your worker"),
            GameError::StuckWorker { .. } => println!("That worker cannot move"),
            GameError::IllegalMove { .. } => println!("Cannot move {}", self.last_direction_name()),
            GameError::IllegalBuild { .. } => {
                println!("Cannot build {}", self.last_direction_name())
            }
            other => println!("{other}"),
        }
    }
}

/// One reader handed to both human players and the undo menu. Stdin can only be
/// locked once, and separate buffers would steal each other's lines.
struct SharedInput<R: BufRead>(Rc<RefCell<LineInput<R>>>);

impl<R: BufRead> SharedInput<R> {
    fn new(reader: R) -> Self {
        SharedInput(Rc::new(RefCell::new(LineInput::new(reader))))
    }

    fn handle(&self) -> Self {
        SharedInput(Rc::clone(&self.0))
    }
}

impl<R: BufRead> TurnInput for SharedInput<R> {
    fn select_worker(&mut self, board: &Board, player: PlayerId) -> Result<WorkerId, GameError> {
        self.0.borrow_mut().select_worker(board, player)
    }

    fn move_direction(&mut self, board: &Board, worker: WorkerId) -> Result<Direction, GameError> {
        self.0.borrow_mut().move_direction(board, worker)
    }

    fn build_direction(
        &mut self,
        board: &Board,
        worker: WorkerId,
        to: Coord,
    ) -> Result<Direction, GameError> {
        self.0.borrow_mut().build_direction(board, worker, to)
    }

    fn rejected(&mut self, error: &GameError) {
        self.0.borrow_mut().rejected(error)
    }
}

/// `A,n,s`: worker, move direction, build direction.
fn describe_turn(record: &TurnRecord) -> String {
    let name = |d: Option<Direction>| d.map(<&'static str>::from).unwrap_or("?");
    format!(
        "{},{},{}",
        record.worker,
        name(Direction::between(record.from, record.to)),
        name(Direction::between(record.to, record.build)),
    )
}

fn display_menu(game: &Game, config: &GameConfig, color: bool) {
    let snapshot = game.board().snapshot();
    if color {
        snapshot.print_to_console();
    } else {
        println!("{snapshot}");
    }

    let player = game.current_player();
    let mut line = format!("Turn: {}, {player}", game.turn());
    if config.score {
        let score = PositionScore::for_player(game.board(), player);
        line.push_str(&format!(", {score}"));
    }
    println!("{line}");
}

enum MenuChoice {
    Next,
    Quit,
}

/// Offers undo and redo until the player asks for the next turn.
fn history_menu(
    game: &mut Game,
    input: &mut impl BufRead,
    config: &GameConfig,
    color: bool,
) -> anyhow::Result<MenuChoice> {
    loop {
        println!("undo, redo, or next");
        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read menu choice")? == 0 {
            return Ok(MenuChoice::Quit);
        }

        match line.trim() {
            "next" => return Ok(MenuChoice::Next),
            "undo" if !game.can_undo() => println!("Nothing to undo"),
            "redo" if !game.can_redo() => println!("Nothing to redo"),
            "undo" => {
                game.undo();
                display_menu(game, config, color);
            }
            "redo" => {
                game.redo();
                display_menu(game, config, color);
            }
            _ => println!("Not a valid option"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;
    debug!(?config, "resolved config");

    let position = match &args.position {
        Some(text) => parse_position(text).context("Failed to parse --position")?,
        None => Position {
            board: Board::new_standard(),
            to_move: PlayerId::One,
        },
    };

    let input = SharedInput::new(std::io::stdin().lock());
    let agents = PlayerId::ALL.map(|player| {
        build_agent(
            config.agent_kind(player),
            config.weights,
            config.seed_for(player),
            || Box::new(input.handle()),
        )
    });
    let mut game = Game::from_position(position, agents, config.undo_redo);

    while game.is_running() {
        display_menu(&game, &config, args.color);

        if config.undo_redo {
            let mut lines = input.0.borrow_mut();
            let choice = history_menu(&mut game, &mut lines.reader, &config, args.color)?;
            if let MenuChoice::Quit = choice {
                return Ok(());
            }
        }

        let computer = game.current_agent().kind().is_computer();
        match game.step() {
            Ok(_) => {}
            Err(GameError::InputClosed) => return Ok(()),
            Err(e) => return Err(e).context("Turn failed"),
        }
        if computer {
            if let Some(record) = game.last_turn() {
                println!("{}", describe_turn(&record));
            }
        }
    }

    if let GameStatus::Won { winner, .. } = game.status() {
        println!("{} has won", winner.name());
    }
    Ok(())
}
