use std::path::Path;

use todo_board::client::Client;
use todo_board::storage::FileKvStore;
use todo_board::board::SubmitOutcome;
use todo_board::{ItemId, NewTodo, TodoBoard};

const SETTINGS_FILE: &str = "todo-board-settings.json";
const URL_VAR: &str = "TODO_BOARD_URL";

const USAGE: &str = "Usage: todo-board [list | add <title> <content> <category> <date> | delete <id> | theme]";


#[tokio::main]
async fn main() {
    env_logger::init();

    if let Ok(url) = std::env::var(URL_VAR) {
        todo_board::config::set_base_url(url);
    }

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid server URL: {}", err);
            std::process::exit(1);
        }
    };
    let settings = match FileKvStore::open(Path::new(SETTINGS_FILE)) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Unable to open {}: {}", SETTINGS_FILE, err);
            std::process::exit(1);
        }
    };

    let mut board = TodoBoard::new(client, settings);
    board.mount().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["list"] => {},
        ["add", title, content, category, date] => {
            *board.form_mut() = NewTodo::new(title, content, category, date);
            match board.submit().await {
                SubmitOutcome::Created => println!("Item created"),
                SubmitOutcome::Incomplete => println!("Every field must be filled in"),
                SubmitOutcome::Failed => println!("Item could not be created, see the logs"),
            }
        },
        ["delete", id] => {
            if board.delete(&ItemId::from(*id)).await == false {
                println!("Item could not be deleted, see the logs");
            }
        },
        ["theme"] => {
            let dark = board.toggle_dark_mode();
            println!("Dark mode is now {}", if dark { "on" } else { "off" });
        },
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        },
    }

    println!("---- {} ({} theme) -----", board.load_state(), if board.is_dark_mode() { "dark" } else { "light" });
    todo_board::utils::print_groups(&board.groups(), board.favorites());
}
