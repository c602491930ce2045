//! Profile-selection menu: a plain blocking prompt/response loop on stdin,
//! run entirely before the terminal enters raw mode. Invalid input is
//! reported and the loop retried; nothing here reaches the session.

use std::io::{self, BufRead, Write};

use space_shooter::profiles::ProfileStore;

pub enum MenuResult {
    Start(String),
    Quit,
}

/// Present the numbered profile list until the user selects a profile,
/// creates one, or quits. Stdin EOF counts as quit.
pub fn choose_profile(store: &ProfileStore) -> io::Result<MenuResult> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let players = store.read_all();

        println!("\n=== Player Profiles ===");
        if players.is_empty() {
            println!("No players yet.");
        } else {
            for (idx, (name, profile)) in players.iter().enumerate() {
                println!("{}. {} (High score: {})", idx + 1, name, profile.score);
            }
        }
        println!("\nOptions:");
        println!("[number] Select player");
        println!("[n]      New player");
        println!("[d]      Delete player");
        println!("[q]      Quit");

        let Some(choice) = prompt(&mut input, "Choose option: ")? else {
            return Ok(MenuResult::Quit);
        };
        let choice = choice.trim().to_lowercase();

        match choice.as_str() {
            "q" => return Ok(MenuResult::Quit),
            "n" => {
                let Some(name) = prompt(&mut input, "Enter new player name: ")? else {
                    return Ok(MenuResult::Quit);
                };
                let name = name.trim();
                if store.create(name) {
                    println!("Created player '{}'.", name);
                    return Ok(MenuResult::Start(name.to_string()));
                }
                println!("Could not create player (maybe exists or empty).");
            }
            "d" => {
                let Some(name) = prompt(&mut input, "Enter EXACT player name to delete: ")?
                else {
                    return Ok(MenuResult::Quit);
                };
                let name = name.trim();
                if store.delete(name) {
                    println!("Deleted '{}'.", name);
                } else {
                    println!("No such player.");
                }
            }
            _ => match choice.parse::<usize>() {
                Ok(idx) if (1..=players.len()).contains(&idx) => {
                    if let Some(selected) = players.keys().nth(idx - 1) {
                        println!("Selected '{}'.", selected);
                        return Ok(MenuResult::Start(selected.clone()));
                    }
                }
                Ok(_) => println!("Invalid number."),
                Err(_) => println!("Invalid input."),
            },
        }
    }
}

/// Print `msg`, read one line. `None` means stdin reached EOF.
fn prompt<R: BufRead>(input: &mut R, msg: &str) -> io::Result<Option<String>> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
