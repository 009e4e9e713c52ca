//! Interactive scoresheet: reads commands and notation tokens from stdin and
//! reports the resulting position strings.

use std::io;
use std::str::FromStr;

use scoresheet_core::command::{Command, Response};
use scoresheet_core::console;
use scoresheet_core::fen::{Fen, START_FEN};
use scoresheet_core::options::Options;
use scoresheet_core::{Game, Position};

/// Base position for a new game, from the StartFen option.
fn new_game(options: &Options) -> Game {
    let fen = options[Options::START_FEN]
        .text()
        .map_or(START_FEN, |text| text.value.as_str());
    Position::parse_fen(fen)
        .map(Game::from)
        .unwrap_or_else(|_| Game::start_position())
}

fn main() -> io::Result<()> {
    println!("Scoresheet 0.1.0, type `help` for commands");

    // Driver parameters.
    let mut options = Options::driver_defaults();
    // If set to true, allow debugging strings to be printed.
    let mut debug = options.is_set(Options::DEBUG);
    // Game being recorded.
    let mut game = new_game(&options);

    loop {
        // Wait to receive a line of input.
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        if input.trim().is_empty() {
            continue;
        }

        let command = match Command::from_str(&input) {
            Ok(command) => command,
            Err(err) => {
                console::error(&err.to_string())?;
                continue;
            }
        };

        match command {
            Command::Help => Response::Help.send()?,

            Command::Quit => break,

            Command::NewGame => {
                game = new_game(&options);
                console::debug(debug, &format!("new game {}", game.position.to_fen()))?;
            }

            Command::Board => Response::Board(game.position.to_string()).send()?,

            Command::Fen => Response::Fen(game.position.to_fen()).send()?,

            Command::History => Response::History(game.position.history().clone()).send()?,

            Command::Debug(new_debug_value) => {
                console::debug(
                    debug | new_debug_value,
                    &format!("set debug {new_debug_value}"),
                )?;

                // Update both driver options and global debug flag.
                if let Some(check) = options[Options::DEBUG].check_mut() {
                    check.value = new_debug_value;
                }
                debug = options.is_set(Options::DEBUG);
            }

            Command::SetOption(raw_opt) => {
                // A start position is only accepted if it decodes.
                if raw_opt.name == Options::START_FEN {
                    if let Err(err) = Position::parse_fen(&raw_opt.value) {
                        console::error(&format!("StartFen {}: {err}", raw_opt.value))?;
                        continue;
                    }
                }

                match options.update(&raw_opt) {
                    Ok(option) => {
                        if option.name == Options::DEBUG {
                            let new_debug_value = option.check().map_or(false, |c| c.value);
                            console::debug(
                                debug | new_debug_value,
                                &format!("setoption Debug {new_debug_value}"),
                            )?;
                            debug = new_debug_value;
                        } else {
                            console::debug(debug, &format!("setoption {}", option.value))?;
                        }
                        if debug {
                            Response::Opt(option.clone()).send()?;
                        }
                    }
                    Err(err) => console::error(&err.to_string())?,
                }
            }

            Command::Pos(new_game) => {
                game = new_game;
                console::debug(debug, &format!("set position {}", game.position.to_fen()))?;
            }

            // Tokens are applied in order until one fails.
            Command::Moves(tokens) => {
                for token in tokens {
                    match game.do_move(&token) {
                        Ok(move_) => {
                            console::debug(debug, &format!("{token} resolved to {move_}"))?;
                            if options.is_set(Options::SHOW_BOARD) {
                                Response::Board(game.position.to_string()).send()?;
                            } else {
                                Response::Fen(game.position.to_fen()).send()?;
                            }
                        }
                        Err(err) => {
                            console::error(&err.to_string())?;
                            break;
                        }
                    }
                }
            }

            Command::Destinations(square) => {
                let destinations = game.position.destinations(square).to_vec();
                Response::Squares(square, destinations).send()?;
            }

            Command::Threats(square) => {
                Response::Squares(square, game.position.threats(square)).send()?;
            }
        }
    }

    Ok(())
}
