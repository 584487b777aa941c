//! SimFS Shell Binary
//!
//! Minimal interactive front-end for the simulated filesystem. Reads one
//! command per line from stdin and maps it onto the façade operations;
//! every error comes back as a printed message, never a crash.

use clap::Parser;
use simfs::blocks::BlockState;
use simfs::error::FsError;
use simfs::fs::FileSystem;
use simfs::logging::{init_logging, LoggingConfig};
use simfs::tree::node::EntryKind;
use simfs::tree::path;
use std::io::{self, BufRead, Write};

/// SimFS - in-memory block filesystem simulation
#[derive(Parser)]
#[command(name = "simfs")]
#[command(about = "In-memory block filesystem simulation shell")]
struct Cli {
    /// Number of storage blocks in the pool
    #[arg(long, default_value = "100")]
    blocks: usize,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log format (json, text)
    #[arg(long, default_value = "text")]
    log_format: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(Some(&LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format.clone(),
        ..LoggingConfig::default()
    }));

    let mut fs = FileSystem::new(cli.blocks);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} > ", fs.current_directory());
        stdout.flush().ok();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("read error: {}", err);
                break;
            }
        }
        let mut parts = line.trim().splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();
        if command.is_empty() {
            continue;
        }
        if command == "exit" || command == "quit" {
            break;
        }
        match run_command(&mut fs, command, rest) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Err(err) => println!("error: {}", err),
        }
    }
}

/// Resolve a shell argument against the current directory.
fn absolute(fs: &FileSystem, arg: &str) -> String {
    if arg.starts_with('/') {
        arg.to_string()
    } else {
        path::join(fs.current_directory(), arg)
    }
}

fn run_command(fs: &mut FileSystem, command: &str, rest: &str) -> Result<String, FsError> {
    match command {
        "ls" => {
            let dir = if rest.is_empty() {
                fs.current_directory().to_string()
            } else {
                absolute(fs, rest)
            };
            let entries = fs.list(&dir)?;
            Ok(entries
                .into_iter()
                .map(|(name, kind)| {
                    let tag = match kind {
                        EntryKind::Directory => "D",
                        EntryKind::File => "F",
                    };
                    format!("[{}] {}", tag, name)
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        "mkdir" => {
            let current = fs.current_directory().to_string();
            fs.create_directory(&current, rest)?;
            Ok(String::new())
        }
        "touch" => {
            let mut args = rest.splitn(2, ' ');
            let name = args.next().unwrap_or("");
            let content = args.next().unwrap_or("");
            let current = fs.current_directory().to_string();
            fs.create_file(&current, name, content)?;
            Ok(String::new())
        }
        "cat" => {
            let target = absolute(fs, rest);
            Ok(fs.read_file(&target)?.to_string())
        }
        "edit" => {
            let mut args = rest.splitn(2, ' ');
            let target = absolute(fs, args.next().unwrap_or(""));
            let content = args.next().unwrap_or("");
            fs.edit_file(&target, content)?;
            Ok(String::new())
        }
        "rm" => {
            let target = absolute(fs, rest);
            fs.remove_node(&target)?;
            Ok(String::new())
        }
        "cd" => {
            let target = absolute(fs, rest);
            fs.navigate(&target)?;
            Ok(String::new())
        }
        "back" => Ok(match fs.navigate_back() {
            Some(dir) => dir,
            None => "no previous directory".to_string(),
        }),
        "pwd" => Ok(fs.current_directory().to_string()),
        "attr" => {
            let args: Vec<&str> = rest.splitn(4, ' ').collect();
            match args.as_slice() {
                ["set", target, name, value] => {
                    let target = absolute(fs, target);
                    fs.set_attribute(&target, name, value)?;
                    Ok(String::new())
                }
                ["get", target, name] => {
                    let target = absolute(fs, target);
                    Ok(fs.get_attribute(&target, name)?.to_string())
                }
                _ => Ok("usage: attr set <path> <name> <value> | attr get <path> <name>".to_string()),
            }
        }
        "bitmap" => Ok(fs
            .occupancy_bitmap()
            .iter()
            .map(|state| match state {
                BlockState::Allocated => '1',
                BlockState::Free => '0',
            })
            .collect()),
        "status" => Ok(serde_json::to_string_pretty(&fs.status()).unwrap_or_default()),
        "help" => Ok(
            "commands: ls [path] | mkdir <name> | touch <name> [content] | cat <path> \
             | edit <path> <content> | rm <path> | cd <path> | back | pwd \
             | attr set <path> <name> <value> | attr get <path> <name> \
             | bitmap | status | exit"
                .to_string(),
        ),
        other => Ok(format!("unknown command: {} (try help)", other)),
    }
}
