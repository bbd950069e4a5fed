// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::path::PathBuf;

use clap::{builder::FalseyValueParser, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fountain-cli", about)]
pub struct Cli {
    /// TOML file describing the codec
    #[arg(long)]
    pub codec_config: PathBuf,

    /// Seed the block id generator from the clock instead of a fixed constant
    #[arg(long, env = "TIME_VARIED_SEED", value_parser = FalseyValueParser::new())]
    pub time_varied_seed: bool,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Encode a file into a stream of framed blocks
    Encode(EncodeArgs),
    /// Decode a stream of framed blocks back into the original file
    Decode(DecodeArgs),
    /// Encode a file and decode it again, reporting how many blocks it took
    Roundtrip(RoundtripArgs),
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    /// Number of encoded blocks to write
    #[arg(long, default_value_t = 100)]
    pub num_blocks: usize,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: PathBuf,

    /// Length of the original file in bytes
    #[arg(long)]
    pub message_len: usize,
}

#[derive(Debug, Args)]
pub struct RoundtripArgs {
    #[arg(long)]
    pub input: PathBuf,

    /// Give up after this many encoded blocks
    #[arg(long, default_value_t = 100_000)]
    pub max_blocks: usize,
}
