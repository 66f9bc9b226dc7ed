// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words keyprobe

use clap::{Args, Parser};

#[derive(Debug, Parser)]
#[command(bin_name = "keyprobe")]
#[command(about = "🔎 See exactly which bytes your keystrokes send 📟\nPress q to quit")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nUSAGE 📓:\n  keyprobe [\x1b[34mOptions\x1b[0m]\n\n{all-args}\n"
)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging"
    )]
    pub enable_logging: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        CLIArg::command().debug_assert();
    }

    #[test]
    fn logging_is_off_by_default() {
        let cli_arg = CLIArg::parse_from(["keyprobe"]);
        assert!(!cli_arg.global_options.enable_logging);
    }

    #[test]
    fn logging_flag_is_parsed() {
        let cli_arg = CLIArg::parse_from(["keyprobe", "--enable-logging"]);
        assert!(cli_arg.global_options.enable_logging);

        let cli_arg = CLIArg::parse_from(["keyprobe", "-l"]);
        assert!(cli_arg.global_options.enable_logging);
    }
}
