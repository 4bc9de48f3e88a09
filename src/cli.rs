use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "episode-renamer")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename a season folder of video files into sequential SxxExx episode names")]
pub struct Args {
    /// Season folder containing the video files
    #[arg(required_unless_present = "undo")]
    pub folder: Option<PathBuf>,

    /// Season number for the SxxExx tag (defaults to the last-used value)
    #[arg(short, long)]
    pub season: Option<u32>,

    /// Episode number for the first file in sort order (defaults to the last-used value)
    #[arg(short = 'e', long)]
    pub start: Option<u32>,

    /// Include video files in subfolders
    #[arg(short, long)]
    pub recurse: bool,

    /// Sort by creation time instead of modification time
    #[arg(long)]
    pub ctime: bool,

    /// Use bare SxxExx names instead of keeping the original name after the tag
    #[arg(long)]
    pub no_titles: bool,

    /// Preview the plan without renaming anything
    #[arg(short, long)]
    pub dry: bool,

    /// Replace the proposed name for a preview row, e.g. "3=S01E03 - Finale.mkv"
    #[arg(long = "override", value_name = "N=NAME")]
    pub overrides: Vec<String>,

    /// Undo the renames recorded in LOG (default: the most recent apply)
    #[arg(short, long, value_name = "LOG")]
    pub undo: Option<Option<PathBuf>>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
