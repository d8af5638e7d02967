use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use libhangul::script::{self, Action};
use libhangul::{compose_str, create_ime_engine, decompose_str, FieldEdit, HangulConfig, TextField};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "libhangul")]
#[command(about = "Korean (Hangul) 2-set input composition engine")]
#[command(version)]
struct Cli {
    /// Hangul config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a run of jamo into syllable blocks
    Compose {
        /// Jamo and blocks to compose, e.g. "ㄱㅏㅂㅣ"
        jamo: String,
    },
    /// Split syllable blocks into jamo
    Decompose {
        /// Text to decompose
        text: String,
    },
    /// Replay a key script on an empty field and print the result
    Type {
        /// Keys to press, e.g. "gksrmf<BS><Space>"
        keys: String,
        /// Print {"text", "caret"} as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive REPL: each line is a key script applied to one field
    Interactive,
}

fn load_config(path: Option<&Path>) -> Result<HangulConfig> {
    match path {
        Some(path) => HangulConfig::load_toml(path)
            .map_err(|e| anyhow!("failed to load config {}: {}", path.display(), e)),
        None => Ok(HangulConfig::default()),
    }
}

fn handle_type_command(config: &HangulConfig, keys: &str, json: bool) -> Result<()> {
    let actions = script::parse(keys).map_err(|e| anyhow!(e))?;
    let mut ime = create_ime_engine(config);
    ime.set_active(true);

    let mut field = TextField::new();
    script::replay(&mut ime, &mut field, &actions);

    if json {
        let edit = FieldEdit::new(field.text(), field.selection().start);
        println!("{}", serde_json::to_string(&edit)?);
    } else {
        println!("{}", field.text());
    }
    Ok(())
}

fn run_repl(config: &HangulConfig) -> Result<()> {
    let mut ime = create_ime_engine(config);
    ime.set_active(true);
    let mut field = TextField::new();

    println!("libhangul REPL. Type key scripts (e.g. gksrmf<BS>), :clear to reset, :q to quit.");
    println!("Toggle with <Toggle> or {}.", ime.toggle_chord());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        let mode = if ime.is_active() { "한" } else { "EN" };
        write!(stdout, "[{}] > ", mode)?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("reading stdin")? == 0 {
            break;
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        match line {
            ":q" | ":quit" => break,
            ":clear" => {
                field.clear();
                ime.reset();
            }
            _ => match script::parse(line) {
                Ok(actions) => {
                    script::replay(&mut ime, &mut field, &actions);
                    if actions.iter().any(|a| matches!(a, Action::Toggle)) {
                        println!("mode: {}", if ime.is_active() { "hangul" } else { "latin" });
                    }
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    continue;
                }
            },
        }

        println!("{}", script::render(&field));
        println!("  jamo: {}", decompose_str(field.text()));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Compose { jamo }) => println!("{}", compose_str(&jamo)),
        Some(Commands::Decompose { text }) => println!("{}", decompose_str(&text)),
        Some(Commands::Type { keys, json }) => handle_type_command(&config, &keys, json)?,
        Some(Commands::Interactive) | None => run_repl(&config)?,
    }
    Ok(())
}
