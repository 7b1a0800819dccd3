use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::{
    config::{
        DEFAULT_HOST, DEFAULT_OWNER, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER, Profile,
    },
    store::DEFAULT_STORE_FILE,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more diagnostics to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a profile's publication list and update the publication file
    Sync {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Publication file to update
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_STORE_FILE)]
        output: PathBuf,
        /// Read the profile page from a saved file instead of the network
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,
        /// Exit with status 2 when no fresh publications could be fetched
        #[arg(long)]
        strict: bool,
    },
    /// Parse a saved profile page and print its publications as JSON
    Extract {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Prefix for the publication links
        #[arg(long, value_name = "URL", default_value = DEFAULT_HOST)]
        host: String,
    },
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Profile identifier (the `user` query parameter)
    #[arg(long, value_name = "ID", default_value = DEFAULT_USER)]
    pub user: String,
    /// Scheme and host of the profile site
    #[arg(long, value_name = "URL", default_value = DEFAULT_HOST)]
    pub host: String,
    /// Number of entries to request
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
    /// Name used in the placeholder record
    #[arg(long, value_name = "NAME", default_value = DEFAULT_OWNER)]
    pub owner: String,
}

impl From<ProfileArgs> for Profile {
    fn from(args: ProfileArgs) -> Self {
        Profile {
            user: args.user,
            host: args.host,
            page_size: args.page_size,
            timeout: Duration::from_secs(args.timeout),
            owner: args.owner,
        }
    }
}
