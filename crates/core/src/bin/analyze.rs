//! Command-line front end: replay games or score a position, printing JSON

use chess_tactics_core::parser::parse_pgn_file;
use chess_tactics_core::{evaluate, AnalysisConfig, Game, GameAnalyzer, GameStatus, RulesEngine};

const USAGE: &str = "Usage:
  analyze pgn <file.pgn>              replay every game in a PGN file
  analyze moves [--fen <FEN>] <move>... replay moves typed loosely
  analyze eval <FEN>                  score a single position";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let analyzer = GameAnalyzer::new(AnalysisConfig::from_env());

    let result = match args.first().map(String::as_str) {
        Some("pgn") if args.len() == 2 => run_pgn(&analyzer, &args[1]),
        Some("moves") => run_moves(&analyzer, &args[1..]),
        Some("eval") if args.len() >= 2 => run_eval(&args[1..].join(" ")),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    match result {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

type CliResult = Result<String, Box<dyn std::error::Error>>;

fn run_pgn(analyzer: &GameAnalyzer, path: &str) -> CliResult {
    let mut reports = Vec::new();
    for game in parse_pgn_file(path)? {
        let start = match game.initial_fen.as_deref() {
            Some(fen) => Game::from_notation(fen)?,
            None => Game::new(),
        };
        let replay = analyzer.replay_from(start, &game.moves)?;
        reports.push(serde_json::json!({
            "game": game.summary(),
            "summary": replay.summary(),
            "replay": replay,
        }));
    }
    Ok(serde_json::to_string_pretty(&reports)?)
}

fn run_moves(analyzer: &GameAnalyzer, args: &[String]) -> CliResult {
    let (start, moves) = match args {
        [flag, fen, rest @ ..] if flag == "--fen" => (Game::from_notation(fen)?, rest),
        rest => (Game::new(), rest),
    };
    let replay = analyzer.replay_from(start, moves)?;
    Ok(serde_json::to_string_pretty(&replay)?)
}

fn run_eval(fen: &str) -> CliResult {
    let game = Game::from_notation(fen)?;
    let output = serde_json::json!({
        "fen": game.notation(),
        "evaluation": evaluate(&game),
        "status": GameStatus::of(&game),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
