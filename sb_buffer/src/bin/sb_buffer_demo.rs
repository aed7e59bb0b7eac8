// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Walks through the buffer API: build a string from pieces, copy it into a second
//! buffer, optionally spill past the inline capacity, then tear both down.
//!
//! ```text
//! cargo run --bin sb_buffer_demo -- --spill --log-level debug
//! ```

use clap::Parser;
use miette::IntoDiagnostic;
use sb_buffer::{DisplayPreference, MemorySize, SbBuffer, TracingConfig, TracingScope,
                WriterConfig, init_tracing, sb_append_literal};

use crate::clap_config::CLIArg;

/// What the buffer holds once the three appends are done.
const GREETING: &str = "Hello World using SB_Buffer!";

fn main() -> miette::Result<()> {
    let cli_arg = match CLIArg::try_parse() {
        Ok(it) => it,
        // `--help` and `--version` also arrive here, and are printed as clap does.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(err).into_diagnostic(),
    };

    // The global subscriber stays installed for the whole run, so the returned guard is
    // always `None` here.
    let _guard = init_tracing(cli_arg.tracing_config())?;

    let mut buffer: SbBuffer = SbBuffer::new();
    let hello = b"Hello";
    buffer.append(&hello[..5])?;
    sb_append_literal!(buffer, " World")?;
    buffer.append_str(" using SB_Buffer!")?;
    debug_assert!(buffer == GREETING);

    println!("Output: {}", buffer.as_c_str()?.to_string_lossy());
    println!("Length: {}", buffer.len());

    let mut copy: SbBuffer = SbBuffer::new();
    copy.copy_from(&buffer)?;

    println!("Output copy: {}", copy.as_c_str()?.to_string_lossy());
    println!("Length copy: {}", copy.len());

    if cli_arg.spill {
        let filler = "0123456789".repeat(cli_arg.spill_size.div_ceil(10));
        buffer.append_str(&filler[..cli_arg.spill_size])?;
        println!(
            "After spill: length {}, capacity {}, storage {:?}, memory {}",
            buffer.len(),
            buffer.capacity(),
            buffer.storage_kind(),
            MemorySize::from(&buffer)
        );
        println!("Copy unchanged: {}", copy == GREETING);
    }

    buffer.finalize();
    copy.finalize();

    Ok(())
}

impl CLIArg {
    fn tracing_config(&self) -> TracingConfig {
        let display = if self.quiet {
            None
        } else {
            Some(DisplayPreference::Stderr)
        };
        let writer_config = match (display, self.log_file.clone()) {
            (Some(display), Some(file)) => WriterConfig::DisplayAndFile(display, file),
            (Some(display), None) => WriterConfig::Display(display),
            (None, Some(file)) => WriterConfig::File(file),
            (None, None) => WriterConfig::None,
        };
        TracingConfig {
            writer_config,
            level: self.log_level,
            scope: TracingScope::Global,
        }
    }
}

mod clap_config {
    use clap::{Parser, builder::RangedU64ValueParser};

    /// Upper bound for `--spill-size`.
    pub const MAX_SPILL_SIZE: u64 = 16 * 1024 * 1024;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "sb_buffer_demo")]
    #[command(about = "Exercise the small string optimized byte buffer")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArg {
        #[arg(
            long,
            short = 's',
            help = "Append enough bytes to move the buffer from inline to heap storage"
        )]
        pub spill: bool,

        #[arg(
            long,
            default_value_t = 300,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_SPILL_SIZE),
            help = "How many bytes to append when --spill is given"
        )]
        pub spill_size: usize,

        #[arg(
            long,
            short = 'l',
            default_value_t = tracing::Level::INFO,
            help = "Log level: trace, debug, info, warn, or error"
        )]
        pub log_level: tracing::Level,

        #[arg(long, help = "Also write logs to this file")]
        pub log_file: Option<String>,

        #[arg(long, short = 'q', help = "Don't write logs to stderr")]
        pub quiet: bool,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() { CLIArg::command().debug_assert(); }

    #[test]
    fn test_tracing_config_from_args() {
        let cli_arg =
            CLIArg::parse_from(["sb_buffer_demo", "-q", "--log-file", "/tmp/demo.log"]);
        let config = cli_arg.tracing_config();
        assert_eq!(
            config.writer_config,
            WriterConfig::File("/tmp/demo.log".to_string())
        );
        assert_eq!(config.level, tracing::Level::INFO);
    }

    #[test]
    fn test_spill_args() {
        let cli_arg = CLIArg::parse_from(["sb_buffer_demo", "--spill", "--spill-size", "42"]);
        assert!(cli_arg.spill);
        assert_eq!(cli_arg.spill_size, 42);
    }

    #[test]
    fn test_spill_size_out_of_range_is_rejected() {
        let too_big = (clap_config::MAX_SPILL_SIZE + 1).to_string();
        let result =
            CLIArg::try_parse_from(["sb_buffer_demo", "--spill-size", too_big.as_str()]);
        assert!(result.is_err());

        let result = CLIArg::try_parse_from(["sb_buffer_demo", "--spill-size", "0"]);
        assert!(result.is_err());

        let max = clap_config::MAX_SPILL_SIZE.to_string();
        let cli_arg = CLIArg::parse_from(["sb_buffer_demo", "--spill-size", max.as_str()]);
        assert_eq!(cli_arg.spill_size as u64, clap_config::MAX_SPILL_SIZE);
    }
}
