use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pylon_webview::NativeChannel;

/// Pylon chat widget tooling: render the widget shell and replay recorded
/// bridge traffic.
#[derive(Parser, Debug)]
#[command(name = "pylon", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the HTML shell generated for a session file.
    Shell {
        /// Session file with a `[chat]` and optional `[user]` table.
        #[arg(short, long)]
        config: PathBuf,

        /// Native channel the shell posts through.
        #[arg(long, value_enum, default_value_t = ChannelArg::Wry)]
        channel: ChannelArg,

        /// Fixed CSP nonce instead of a random one.
        #[arg(long)]
        nonce: Option<String>,
    },
    /// Feed recorded page messages (one JSON object per line) to a headless
    /// widget and print what the host would see.
    Replay {
        #[arg(short, long)]
        config: PathBuf,

        /// JSONL trace of bridge messages. Blank lines and `#` comments are
        /// skipped.
        trace: PathBuf,

        /// Hit-test these physical-pixel points ("x,y") after the replay.
        #[arg(long, value_parser = parse_point)]
        probe: Vec<(f64, f64)>,

        /// Also print React Native events, converting bounds with this
        /// display density.
        #[arg(long)]
        rn_density: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelArg {
    Android,
    Webkit,
    Wry,
}

impl From<ChannelArg> for NativeChannel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Android => NativeChannel::AndroidInterface,
            ChannelArg::Webkit => NativeChannel::WebKitHandler,
            ChannelArg::Wry => NativeChannel::WryIpc,
        }
    }
}

pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok((x, y))
}

pub fn parse() -> Args {
    Args::parse()
}
