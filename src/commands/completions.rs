// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 bookyard contributors
//! Completions command - shell completion scripts on stdout

use std::io;

use anyhow::Result;
use clap::Command;
use clap_complete::Shell;

/// Run the completions command
pub fn run(shell: Shell, cmd: &mut Command) -> Result<()> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, &mut io::stdout());
    Ok(())
}
