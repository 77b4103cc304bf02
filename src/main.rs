mod tic_tac_toe;
mod minimax;
mod game;
mod session;

use std::io::{self, BufRead, Write};

use log::warn;

use minimax::Minimax;
use session::{Phase, Session};
use tic_tac_toe::{TicTacToe, COMPUTER, HUMAN};

enum Command {
    Play(usize),
    Restart,
    Quit,
}

fn parse_command(input: &str) -> anyhow::Result<Command> {
    match input.trim() {
        "q" | "quit" => Ok(Command::Quit),
        "r" | "restart" => Ok(Command::Restart),
        cell => Ok(Command::Play(cell.parse()?)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let minimax = Minimax::<TicTacToe>::new(COMPUTER, HUMAN);
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", session.game());
        println!("{}", session.status());

        if let Phase::GameOver(_) = session.phase() {
            println!("Type r to play again or q to quit.");
        } else {
            println!("Pick a cell 0-8 (r restarts, q quits).");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(command) => command,
            Err(err) => {
                warn!("Unrecognised input: {}", err);
                println!("Enter a cell number between 0 and 8.");
                continue;
            }
        };

        session = match command {
            Command::Quit => break,
            Command::Restart => session.reset(),
            Command::Play(cell) => {
                let next = session.apply_player_move(cell);
                if next == session {
                    println!("Cell {} can't be played right now.", cell);
                }
                next.apply_computer_move(&minimax)?
            }
        };
    }

    Ok(())
}
