//! PGN import for game replay

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use serde::Serialize;
use shakmaty::{fen::Fen, CastlingMode, Chess, EnPassantMode, Position};
use std::fs;
use std::io::Cursor;
use std::ops::ControlFlow;
use std::path::Path;

use crate::error::{Error, Result};

/// Main line and headers of one game.
#[derive(Debug, Clone, Serialize)]
pub struct PgnGame {
    pub event: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    /// Starting position from a `FEN` header, when the game does not begin
    /// from the standard setup.
    pub initial_fen: Option<String>,
    /// Main-line moves in SAN, without check suffixes.
    pub moves: Vec<String>,
    pub final_fen: String,
}

impl PgnGame {
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn summary(&self) -> String {
        let white = self.white.as_deref().unwrap_or("Unknown");
        let black = self.black.as_deref().unwrap_or("Unknown");
        let result = self.result.as_deref().unwrap_or("*");
        format!("{} vs {} - {}", white, black, result)
    }
}

#[derive(Default)]
struct Headers {
    event: Option<String>,
    white: Option<String>,
    black: Option<String>,
    result: Option<String>,
    fen: Option<String>,
}

struct Movetext {
    headers: Headers,
    moves: Vec<String>,
    position: Chess,
    valid: bool,
}

struct GameVisitor;

impl Visitor for GameVisitor {
    type Tags = Headers;
    type Movetext = Movetext;
    type Output = Option<PgnGame>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(Headers::default())
    }

    fn tag(
        &mut self,
        headers: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let value = value.decode_utf8_lossy().to_string();
        match name {
            b"Event" => headers.event = Some(value),
            b"White" => headers.white = Some(value),
            b"Black" => headers.black = Some(value),
            b"Result" => headers.result = Some(value),
            b"FEN" => headers.fen = Some(value),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, headers: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match headers.fen.as_deref() {
            Some(fen) => starting_position(fen),
            None => Some(Chess::default()),
        };
        let valid = start.is_some();
        ControlFlow::Continue(Movetext {
            headers,
            moves: Vec::new(),
            position: start.unwrap_or_default(),
            valid,
        })
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        if !movetext.valid {
            return ControlFlow::Continue(());
        }

        let played = san_plus
            .san
            .to_move(&movetext.position)
            .ok()
            .and_then(|m| movetext.position.clone().play(m).ok());

        match played {
            Some(next) => {
                movetext.moves.push(san_plus.san.to_string());
                movetext.position = next;
            }
            None => movetext.valid = false,
        }
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _movetext: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        if !movetext.valid {
            return None;
        }
        Some(PgnGame {
            event: movetext.headers.event,
            white: movetext.headers.white,
            black: movetext.headers.black,
            result: movetext.headers.result,
            initial_fen: movetext.headers.fen,
            moves: movetext.moves,
            final_fen: Fen::from_position(&movetext.position, EnPassantMode::Legal).to_string(),
        })
    }
}

fn starting_position(fen: &str) -> Option<Chess> {
    fen.parse::<Fen>()
        .ok()?
        .into_position(CastlingMode::Standard)
        .ok()
}

pub fn parse_pgn_file<P: AsRef<Path>>(path: P) -> Result<Vec<PgnGame>> {
    let contents = fs::read_to_string(path)?;
    parse_pgn_string(&contents)
}

/// Parses every game in `pgn`, skipping games whose movetext is illegal.
pub fn parse_pgn_string(pgn: &str) -> Result<Vec<PgnGame>> {
    let mut visitor = GameVisitor;
    let mut games = Vec::new();
    let mut reader = pgn_reader::Reader::new(Cursor::new(pgn.as_bytes()));

    loop {
        match reader.read_game(&mut visitor) {
            Ok(Some(Some(game))) => games.push(game),
            Ok(Some(None)) => {}
            Ok(None) => break,
            Err(e) => return Err(Error::Pgn(e.to_string())),
        }
    }

    if games.is_empty() {
        Err(Error::Pgn("no valid games found".to_string()))
    } else {
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PGN: &str = r#"[Event "Test"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 (3. Bc4 Bc5) a6 1-0
"#;

    #[test]
    fn parses_main_line() {
        let games = parse_pgn_string(SAMPLE_PGN).unwrap();
        assert_eq!(games.len(), 1);

        let game = &games[0];
        assert_eq!(game.white.as_deref(), Some("Alice"));
        assert_eq!(game.result.as_deref(), Some("1-0"));
        assert_eq!(game.moves, vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(game.summary(), "Alice vs Bob - 1-0");
    }

    #[test]
    fn final_position_is_tracked() {
        let games = parse_pgn_string(SAMPLE_PGN).unwrap();
        assert_eq!(
            games[0].final_fen,
            "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4"
        );
    }

    #[test]
    fn fen_header_sets_start() {
        let pgn = r#"[SetUp "1"]
[FEN "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"]

1. e4 Kd7 *
"#;
        let games = parse_pgn_string(pgn).unwrap();
        assert_eq!(games[0].initial_fen.as_deref(), Some("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"));
        assert_eq!(games[0].move_count(), 2);
    }

    #[test]
    fn illegal_movetext_yields_no_game() {
        let err = parse_pgn_string("1. e5 *\n").unwrap_err();
        assert!(matches!(err, Error::Pgn(_)));
    }
}
