//! Self-play driver: pits two bots against each other from the opening or a
//! FEN position and prints the moves and the final board.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use ply_chess::board::board::Board;
use ply_chess::engines::engine_alpha_beta::AlphaBetaBot;
use ply_chess::engines::engine_minimax::MinimaxBot;
use ply_chess::engines::engine_random::RandomBot;
use ply_chess::engines::engine_trait::Bot;
use ply_chess::move_generation::player::MoveStatus;
use ply_chess::search::alpha_beta::SearchConfig;
use ply_chess::search::board_scoring::{EnhancedEvaluator, StandardEvaluator};
use ply_chess::utils::fen_generator::generate_fen;
use ply_chess::utils::fen_parser::parse_fen;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BotKind {
    AlphaBeta,
    Minimax,
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play driver for the ply_chess engine")]
struct Cli {
    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Thinking time per move for the alpha-beta bot, in milliseconds
    #[arg(long, default_value_t = 1000)]
    think_ms: u64,

    /// Stop after this many plies even if the game is not over
    #[arg(long, default_value_t = 80)]
    plies: u32,

    #[arg(long, value_enum, default_value_t = BotKind::AlphaBeta)]
    white: BotKind,

    #[arg(long, value_enum, default_value_t = BotKind::AlphaBeta)]
    black: BotKind,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,

    /// Penalize stalemates and threefold repetitions in the alpha-beta evaluator
    #[arg(long)]
    draw_penalty: bool,

    /// Log search progress
    #[arg(long)]
    debug: bool,
}

fn make_bot(kind: BotKind, cli: &Cli) -> Box<dyn Bot> {
    match kind {
        BotKind::AlphaBeta => {
            let config = SearchConfig {
                max_depth: cli.depth,
                ..SearchConfig::default()
            };
            let evaluator = EnhancedEvaluator::new().with_draw_penalty(cli.draw_penalty);
            Box::new(
                AlphaBetaBot::new(evaluator, config)
                    .with_think_time(Duration::from_millis(cli.think_ms)),
            )
        }
        BotKind::Minimax => Box::new(MinimaxBot::new(StandardEvaluator)),
        BotKind::Random => Box::new(RandomBot::new()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.depth == 0 {
        bail!("--depth must be >= 1");
    }

    let mut board = match &cli.fen {
        Some(fen) => parse_fen(fen).with_context(|| format!("failed to parse FEN `{fen}`"))?,
        None => Board::create_standard_board(),
    };

    let mut white = make_bot(cli.white, &cli);
    let mut black = make_bot(cli.black, &cli);
    log::info!("{} (white) vs {} (black)", white.name(), black.name());

    let mut history = Vec::new();
    for _ in 0..cli.plies {
        let player = board.current_player();
        if player.is_in_checkmate() {
            println!("{} is checkmated", player.color());
            break;
        }
        if player.is_in_stalemate() {
            println!("stalemate");
            break;
        }

        let bot = if board.side_to_move().is_white() {
            &mut white
        } else {
            &mut black
        };
        let Some(mv) = bot.execute(&board, cli.depth) else {
            println!("{} has no move", player.color());
            break;
        };

        let transition = player.play_move(&mv);
        if transition.status() != MoveStatus::Done {
            bail!("{} chose {mv}, which was rejected as {:?}", bot.name(), transition.status());
        }
        let next = transition.into_board();
        println!("{:>3}. {} {}", board.fullmove_number(), board.side_to_move().tag(), mv);

        white.observe(&board, &mv, &next);
        black.observe(&board, &mv, &next);
        history.push(mv);
        board = next;
    }

    println!("{board}");
    println!("{}", generate_fen(&board));
    log::info!("{} plies played", history.len());
    Ok(())
}
