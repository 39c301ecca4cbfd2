// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for csver
//
// Separated from main.rs so that build.rs can include this file
// to generate the man page via clap_mangen.

use clap::{Parser, Subcommand};

/// What to look up
#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// List the versions of one platform (stdin keys: IAM_TOKEN, PLATFORM)
    Versions,
    /// List add-on versions and their compatibility ranges (stdin keys: IAM_TOKEN, REGION)
    Addons,
}

/// CLI argument parser
#[derive(Parser, Debug)]
#[command(
    name = "csver",
    version,
    about = "IBM Cloud Kubernetes Service versions for Terraform external data sources",
    long_about = "Reads a JSON query from stdin, calls the IBM Cloud Kubernetes Service API \
                  and prints a flat JSON object of JSON-encoded strings on stdout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API endpoint (hostname or URL; the path defaults to /global)
    #[arg(long = "api-endpoint", value_name = "URL", env = "IBMCLOUD_CS_API_ENDPOINT", global = true)]
    pub api_endpoint: Option<String>,

    /// Abort the API request after this many seconds
    #[arg(long = "timeout", value_name = "SECONDS", value_parser = parse_timeout, global = true)]
    pub timeout: Option<u64>,

    /// Make the operation more talkative (logs go to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("timeout must be at least 1 second".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(format!("invalid timeout '{s}': {e}")),
    }
}
