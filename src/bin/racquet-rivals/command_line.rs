// This file is part of racquet-rivals.
//
// racquet-rivals is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// racquet-rivals is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::io::Write as _;

use clap::{CommandFactory, Parser};
use racquet_rivals::{COPYRIGHT, LONG_VERSION};

/// Racquet Rivals
///
/// Reads draw slot results from standard input, one command per line, then
/// closes prediction windows and scores predictions.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Racquet Rivals bracket scoring")]
pub(crate) struct Args {
    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether to log emails instead of sending them
    #[arg(long)]
    pub skip_emails: bool,

    /// Whether to skip the data file
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    pub systemd: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("racquet-rivals").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-16");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("racquet-rivals.1", buffer)?;
        Ok(())
    }
}
