//! 端末で動作する最小 UI。
//!
//! 人間が UCI 表記で手を入力し、コンピュータが難易度に応じて応手する。

mod app;
mod command;

use std::error::Error;
use std::io::{self, BufRead as _, Write};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use kishi_core::ai::{Difficulty, Opponent, SelectError};
use kishi_core::engine::{Color, Game, Position};
use tracing_subscriber::EnvFilter;

use app::{App, Notice};
use command::Command;

/// `RUST_LOG` が無いときのログレベル。盤面表示を邪魔しないよう控えめにする。
const DEFAULT_LOG_FILTER: &str = "warn";

/// 人間が持つ色。
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Side {
    /// 後手。
    Black,
    /// 先手。
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Self::Black,
            Side::White => Self::White,
        }
    }
}

/// コマンドライン引数。
#[derive(Debug, Parser)]
#[command(name = "kishi", version, about = "Play chess against a simple computer opponent")]
struct Args {
    /// 相手の強さ（easy, medium, hard）。
    #[arg(long, default_value = "easy", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// 開始局面の FEN（省略時は初期局面）。
    #[arg(long)]
    fen: Option<String>,

    /// 人間が持つ色。
    #[arg(long, value_enum, default_value_t = Side::White)]
    human: Side,

    /// 相手が指すまでの待ち時間（ミリ秒）。
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// ログを JSON で出力する。
    #[arg(long)]
    log_json: bool,

    /// 相手の乱数の seed（指定すると再現可能になる）。
    #[arg(long)]
    seed: Option<u64>,
}

/// `--difficulty` の値を解釈する。
fn parse_difficulty(text: &str) -> Result<Difficulty, SelectError> {
    text.parse()
}

/// ログ出力（stderr）を初期化する。
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 使い方を表示する。
fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  <move>              play a move in UCI notation (e2e4, e7e8q)")?;
    writeln!(out, "  undo                take back your last move and the reply")?;
    writeln!(out, "  difficulty <tier>   switch to easy, medium or hard")?;
    writeln!(out, "  board               show the board")?;
    writeln!(out, "  help                show this help")?;
    writeln!(out, "  quit                leave the game")
}

/// 盤面と手番を表示する。
fn print_board<R>(out: &mut impl Write, app: &App<R>) -> io::Result<()>
where
    R: kishi_core::ai::rng::RandomSource,
{
    let game = app.game();
    writeln!(out, "{}", game.position())?;
    let side = match game.side_to_move() {
        Color::White => "White",
        Color::Black => "Black",
    };
    writeln!(out, "{side} to move ({})", app.difficulty())
}

/// 通知を表示する。
fn print_notices(out: &mut impl Write, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        writeln!(out, "{notice}")?;
    }
    Ok(())
}

/// コンピュータの手番であれば、少し待ってから指させる。
fn step_opponent<R>(out: &mut impl Write, app: &mut App<R>, delay: Duration) -> io::Result<()>
where
    R: kishi_core::ai::rng::RandomSource,
{
    if app.is_human_turn() || app.game().is_game_over() {
        return Ok(());
    }

    out.flush()?;
    std::thread::sleep(delay);
    let notices = app.opponent_turn();
    print_notices(out, &notices)?;
    print_board(out, app)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.log_json);

    let position = match args.fen.as_deref() {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::initial(),
    };
    let opponent = match args.seed {
        Some(seed) => Opponent::seeded(args.difficulty, seed),
        None => Opponent::from_entropy(args.difficulty),
    };
    let delay = Duration::from_millis(args.delay_ms);
    tracing::info!(
        difficulty = %args.difficulty,
        human = ?args.human,
        fen = %position.fen(),
        "starting game"
    );

    let mut app = App::new(Game::from_position(position), args.human.into(), opponent);
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_board(&mut out, &app)?;
    step_opponent(&mut out, &mut app, delay)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(value) => value,
            Err(command::CommandError::Empty) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Board => print_board(&mut out, &app)?,
            Command::Difficulty(difficulty) => {
                print_notices(&mut out, &app.set_difficulty(difficulty))?;
            }
            Command::Help => print_help(&mut out)?,
            Command::Move(text) => {
                let before = app.game().ply();
                print_notices(&mut out, &app.human_move(&text))?;
                if app.game().ply() != before {
                    print_board(&mut out, &app)?;
                }
            }
            Command::Quit => break,
            Command::Undo => {
                print_notices(&mut out, &app.undo_turn())?;
                print_board(&mut out, &app)?;
            }
        }

        step_opponent(&mut out, &mut app, delay)?;
    }

    Ok(())
}
