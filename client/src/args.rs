use std::collections::HashMap;
use std::str::FromStr;

use clap::{Args as ArgsTrait, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plays a sequence of moves on the engine, alternating colors from black.
    Replay(ReplayConfig),
    /// Sends operations read from stdin, one per line, and prints the results.
    Shell(ShellConfig),
}

#[derive(ArgsTrait, Clone, Debug)]
pub struct EngineConfig {
    /// The engine command line. It must speak GTP on stdin and stdout.
    #[arg(short, long, default_value = "gnugo --mode gtp", verbatim_doc_comment)]
    pub engine: String,

    /// Game options.
    ///
    /// Parameters:
    ///   size=int       - The size of the board. (2 - 25)
    ///   komi=decimal   - Points given to white.
    ///   handicap=int   - Fixed handicap stones for black. (0, or 2 - 9)
    #[arg(short, long, default_value = "size=19,komi=6.5", verbatim_doc_comment)]
    pub game: Game,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(ArgsTrait, Clone, Debug)]
pub struct ReplayConfig {
    #[command(flatten)]
    pub engine: EngineConfig,

    /// The moves to play, e.g. D4 Q16 pass.
    #[arg(required = true)]
    pub moves: Vec<String>,
}

#[derive(ArgsTrait, Clone, Debug)]
pub struct ShellConfig {
    #[command(flatten)]
    pub engine: EngineConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub size: usize,
    pub komi: f32,
    pub handicap: usize,
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = parse_map(s)?;

        let size = fields
            .get("size")
            .map(|&f| {
                f.parse::<usize>()
                    .map_err(|_| format!("invalid value for size: {f}"))
            })
            .transpose()?
            .unwrap_or(19);
        if !(2..=25).contains(&size) {
            return Err(format!("invalid value for size (2 - 25): {size}"));
        }

        let komi = fields
            .get("komi")
            .map(|&f| {
                f.parse::<f32>()
                    .map_err(|_| format!("invalid value for komi: {f}"))
            })
            .transpose()?
            .unwrap_or(6.5);

        let handicap = fields
            .get("handicap")
            .map(|&f| {
                f.parse::<usize>()
                    .map_err(|_| format!("invalid value for handicap: {f}"))
            })
            .transpose()?
            .unwrap_or_default();
        if handicap == 1 || handicap > 9 {
            return Err(format!("invalid value for handicap (0, or 2 - 9): {handicap}"));
        }

        Ok(Game {
            size,
            komi,
            handicap,
        })
    }
}

fn parse_map(string: &str) -> Result<HashMap<&str, &str>, String> {
    string
        .split(',')
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .map(|field| field.split('=').map(|part| part.trim()))
        .map(|mut field_part| {
            let key = field_part
                .next()
                .ok_or_else(|| "no key for field".to_owned())?;
            let value = field_part
                .next()
                .ok_or_else(|| format!("no value for key: {key}"))?;
            Ok((key, value))
        })
        .collect()
}
