use std::io::{self, Write};
use std::sync::Arc;
use anyhow::{bail, Context};
use wordsim::{loader, ExplainOutcome, SearchOutcome, Session, Settings, Catalog};

/// Words listed after a "not found" message.
const HINT_WORDS: usize = 20;

pub enum Command {
    Search { word: String },
    Explain { word: String, candidate: String },
    Suggest { prefix: String },
    Dataset { name: Option<String> },
    Words,
    Info,
}

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: search, explain, suggest, dataset, words, info".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "search" => parse_search(args),
        "explain" => parse_explain(args),
        "suggest" => parse_suggest(args),
        "dataset" => Ok(Command::Dataset { name: args.get(2).cloned() }),
        "words" => Ok(Command::Words),
        "info" => Ok(Command::Info),
        _ => Err(format!("Unknown command: {}. Available: search, explain, suggest, dataset, words, info", command)),
    }
}

/// Parse the 'search' command
/// Usage: wordsim search <word>
fn parse_search(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'search' command requires a word. Usage: search <word>".to_string());
    }
    if args.len() > 3 {
        eprintln!("Warning: 'search' takes a single word, ignoring extras");
    }

    Ok(Command::Search { word: args[2].clone() })
}

/// Parse the 'explain' command
/// Usage: wordsim explain <word> <candidate>
fn parse_explain(args: &[String]) -> Result<Command, String> {
    if args.len() < 4 {
        return Err("'explain' command requires two words. Usage: explain <word> <candidate>".to_string());
    }

    Ok(Command::Explain { word: args[2].clone(), candidate: args[3].clone() })
}

/// Parse the 'suggest' command
/// Usage: wordsim suggest <prefix>
fn parse_suggest(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'suggest' command requires a prefix. Usage: suggest <prefix>".to_string());
    }

    Ok(Command::Suggest { prefix: args[2].clone() })
}

/// REPL mode - interactive session on the selected dataset
pub fn run_repl(session: &mut Session) {
    println!("wordsim - Word Similarity Search");
    if let Err(error) = print_dataset(session, &mut io::stdout()) {
        eprintln!("Error writing output: {}", error);
    }
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("wordsim[{}]> ", session.name());
        if let Err(error) = io::stdout().flush() {
            eprintln!("Error writing prompt: {}", error);
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let mut args: Vec<String> = vec!["wordsim".to_string()];
        args.extend(input.split_whitespace().map(|s| s.to_string()));

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        if let Err(error) = execute_command(session, command, &mut io::stdout()) {
            eprintln!("Error writing output: {}", error);
        }
    }
}

/// Single-command mode - load a dataset file and execute one command
/// Usage: wordsim <dataset_file> <command> [args...]
pub fn run_single_command(args: &[String], settings: &Settings) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("Usage: wordsim <dataset_file> <command> [args...]");
    }

    let path = std::path::Path::new(&args[1]);
    let store = loader::load_dataset_file(&loader::dataset_name(path), path)
        .with_context(|| format!("Error loading '{}'", path.display()))?;

    let mut session = Session::from_store(Catalog::new(settings.datasets.clone()), Arc::new(store))
        .with_limits(settings.top_k, settings.max_suggestions);

    // Rebuild args: shift so args[1] becomes the command
    let shifted_args: Vec<String> = std::iter::once(args[0].clone())
        .chain(args[2..].iter().cloned())
        .collect();

    let command = parse_command_from_args(&shifted_args).map_err(anyhow::Error::msg)?;
    execute_command(&mut session, command, &mut io::stdout().lock())?;

    Ok(())
}

/// Compile mode - convert a dataset file to the binary format
/// Usage: wordsim compile <input> <output.bin>
pub fn run_compile(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 4 {
        bail!("Usage: wordsim compile <input.json> <output.bin>");
    }

    let dataset = loader::compile(&args[2], &args[3])?;
    println!("Compiled {} words to '{}'", dataset.words.len(), args[3]);

    Ok(())
}

/// Runs one command against the session, writing its output to `out`.
fn execute_command(session: &mut Session, command: Command, out: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Search { word } => {
            match session.search(&word) {
                SearchOutcome::Empty => {}
                SearchOutcome::NotFound(word) => {
                    writeln!(out, "Word \"{}\" not found in database", word)?;
                    let suggestions = session.suggest(&word);
                    if !suggestions.is_empty() {
                        writeln!(out, "Did you mean: {}", suggestions.join(", "))?;
                    } else {
                        let words = session.store().words();
                        let hint: Vec<&str> = words.iter().take(HINT_WORDS).map(String::as_str).collect();
                        writeln!(out, "Some words in '{}': {} ...", session.name(), hint.join(", "))?;
                    }
                }
                SearchOutcome::Found(results) => {
                    if results.is_empty() {
                        writeln!(out, "No other words in dataset")?;
                    } else {
                        writeln!(out, "Top {} most similar words to \"{}\":", results.len(), word.trim())?;
                        for (rank, result) in results.iter().enumerate() {
                            writeln!(out, "{:>3}. {:<20} {:.6}", rank + 1, result.word, result.similarity)?;
                        }
                    }
                }
            }
        }

        Command::Explain { word, candidate } => {
            match session.explain(&word, &candidate) {
                ExplainOutcome::Found(breakdown) => writeln!(out, "{}", breakdown)?,
                ExplainOutcome::NotFound(word) => writeln!(out, "Word \"{}\" not found in database", word)?,
            }
        }

        Command::Suggest { prefix } => {
            let suggestions = session.suggest(&prefix);
            if suggestions.is_empty() {
                writeln!(out, "No suggestions")?;
            } else {
                for word in suggestions {
                    writeln!(out, "  {}", word)?;
                }
            }
        }

        Command::Dataset { name: None } => {
            for name in session.catalog().names() {
                let marker = if name == session.name() { "*" } else { " " };
                writeln!(out, "{} {}", marker, name)?;
            }
        }

        Command::Dataset { name: Some(name) } => {
            match session.select(&name) {
                Ok(()) => print_dataset(session, out)?,
                Err(error) => writeln!(out, "Error: {}", error)?,
            }
        }

        Command::Words => {
            for word in session.store().words() {
                writeln!(out, "{}", word)?;
            }
            writeln!(out, "Total: {} words", session.store().size())?;
        }

        Command::Info => print_dataset(session, out)?,
    }

    Ok(())
}

fn print_dataset(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let store = session.store();
    writeln!(
        out,
        "Dataset '{}': {} words, {} dimensions",
        session.name(), store.size(), store.dimensionality()
    )?;
    if let Some(info) = session.info() {
        if !info.model_label.is_empty() {
            writeln!(out, "Model: {} ({})", info.model_label, info.model_link)?;
        }
        if !info.description.is_empty() {
            writeln!(out, "{}", info.description)?;
        }
    }
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  search <word>               - Top 10 most similar words");
    println!("  explain <word> <candidate>  - Show the cosine similarity calculation");
    println!("  suggest <prefix>            - Words starting with a prefix");
    println!("  dataset [name]              - List datasets or switch to one");
    println!("  words                       - List all words in the dataset");
    println!("  info                        - Show dataset details");
    println!("  help                        - Show this help");
    println!("  exit, quit                  - Exit the program");
}
