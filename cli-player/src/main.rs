//! Console player that can run compiled `.json` story files written in the
//! **Squiffy** language.
use std::{
    env,
    error::Error,
    fs,
    io::{self, IsTerminal, Write},
    path::Path,
    process, thread,
};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use rand::Rng;
use squiffyrt::{
    choice::ChoiceEntry,
    render::{self, Fragment},
    session::Effect,
    story::Story,
    story_error::StoryError,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_STORY: &str = "story.json";
const END_OF_STORY: &str = "~ fin ~";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The compiled story .json file
    #[arg(default_value = DEFAULT_STORY)]
    pub story_filename: String,

    /// Choose options randomly
    #[arg(short, long, default_value_t = false)]
    pub auto_play: bool,

    /// Print external links instead of opening them
    #[arg(short, long, default_value_t = false)]
    pub no_open: bool,
}

enum Command {
    Choose(usize),
    Exit(),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let story_path = env::current_dir()?.join(&args.story_filename);
    let json_string = get_json_string(&story_path)?;

    // REMOVE BOM if exists
    let json_string_without_bom = json_string.strip_prefix('\u{feff}').unwrap_or(&json_string);

    let mut story = Story::new(json_string_without_bom)
        .with_context(|| format!("could not load story `{}`", story_path.to_string_lossy()))?;

    let interactive = !args.auto_play && io::stdin().is_terminal() && io::stdout().is_terminal();

    if let Some(title) = story.get_title() {
        println!("{}", title.bold());
    }

    loop {
        // after a selection that couldn't be applied the same choices are
        // offered again without walking the story
        if story.can_continue() {
            story.cont_with(print_fragment)?;
            println!("\n");
        }

        let choices = story.get_current_choices().to_vec();

        if choices.is_empty() {
            println!("{END_OF_STORY}\n");
            io::stdout().flush()?;
            break;
        }

        let command = if args.auto_play {
            let i = rand::thread_rng().gen_range(0..choices.len());

            print_choices(&choices);
            println!("?> {}", i + 1);

            Command::Choose(i)
        } else if interactive {
            select_choice(&choices)?
        } else {
            read_input(&choices)?
        };

        let end = process_command(command, &mut story, &args)?;

        if end {
            break;
        }
    }

    Ok(())
}

fn print_fragment(fragment: &Fragment) {
    match fragment {
        Fragment::Text { .. } => print!("{}", fragment.to_plain_string()),
        Fragment::Choice(text) => print!("{}", text.underline().cyan()),
        Fragment::Alert(message) => {
            let border = render::alert_border(message);

            print!("{border}");
            println!(" |  {}  | ", message.dimmed());
            print!("{border}");
        }
    }
}

// Returns true if the program has to stop
fn process_command(
    command: Command,
    story: &mut Story,
    args: &Args,
) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Choose(c) => match story.choose_choice_index(c) {
            Ok(Effect::OpenResource(url)) => {
                if args.no_open {
                    println!("<open: {url}>");
                } else {
                    open_resource(&url);
                }
            }
            Ok(Effect::Continue) => {}
            // a random pick could keep selecting the same broken link
            Err(StoryError::UnknownDestination(msg)) if !args.auto_play => print_error(&msg),
            Err(e) => return Err(e.into()),
        },
        Command::Exit() => return Ok(true),
    }

    Ok(false)
}

/// Opens `url` with the default handler of the host without waiting for it.
fn open_resource(url: &str) {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = process::Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        process::Command::new("open")
    } else {
        process::Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(process::Stdio::null())
        .stdout(process::Stdio::null())
        .stderr(process::Stdio::null());

    match command.spawn() {
        Ok(mut child) => {
            tracing::debug!(url, "opening external resource");

            // reap the opener when it exits
            thread::spawn(move || child.wait());
        }
        Err(e) => tracing::warn!(url, "could not open external resource: {}", e),
    }
}

fn print_choices(choices: &[ChoiceEntry]) {
    for (i, c) in choices.iter().enumerate() {
        println!("{}: {}", i + 1, c.text);
    }
}

fn select_choice(choices: &[ChoiceEntry]) -> Result<Command, Box<dyn Error>> {
    let items: Vec<&str> = choices.iter().map(|c| c.text.as_str()).collect();

    let selection = dialoguer::Select::new()
        .with_prompt("Select an option: ")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Command::Choose(selection))
}

fn read_input(choices: &[ChoiceEntry]) -> Result<Command, Box<dyn Error>> {
    let mut line = String::new();

    loop {
        print_choices(choices);
        print!("?> ");
        io::stdout().flush()?;

        line.clear();
        let read = std::io::stdin().read_line(&mut line)?;

        if read == 0 {
            return Err("unexpected end of input".into());
        }

        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        if let Ok(v) = trimmed.parse::<usize>() {
            if v < 1 || v > choices.len() {
                print_error("option out of range");
                continue;
            }

            return Ok(Command::Choose(v - 1));
        }

        match trimmed.to_lowercase().as_str() {
            "exit" | "quit" => return Ok(Command::Exit()),
            "help" => println!("Commands:\n\t<option number>\n\thelp\n\tquit\n\t"),
            _ => print_error("unrecognized option or command"),
        }
    }
}

fn print_error(error: &str) {
    eprintln!("<{error}>");
}

fn get_json_string(path: &Path) -> Result<String, Box<dyn Error>> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "unable to find story file at path `{}`",
            path.to_string_lossy()
        )
    })?;

    Ok(json)
}
