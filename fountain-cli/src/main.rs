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

use std::{
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use bytes::{Bytes, BytesMut};
use clap::Parser;
use eyre::{bail, Result, WrapErr};
use fountain_codec::{deserialize_stream, AnyCodec, Codec, CodecConfig, Encoder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, DecodeArgs, EncodeArgs, Mode, RoundtripArgs};

mod cli;

const FIXED_SEED: u64 = 8923489;

// Demo block ids are drawn from [0, MAX_DEMO_BLOCK_ID).
const MAX_DEMO_BLOCK_ID: i64 = 60000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Cli::parse();
    info!(?args);

    let codec = load_codec(&args.codec_config)?;
    info!(
        kind = codec.kind(),
        source_blocks = codec.source_blocks().get(),
        intermediate_blocks = codec.intermediate_blocks(),
        "loaded codec"
    );

    let mut block_ids = StdRng::seed_from_u64(demo_seed(args.time_varied_seed));

    match args.mode {
        Mode::Encode(args) => encode(&codec, &mut block_ids, args),
        Mode::Decode(args) => decode(&codec, args),
        Mode::Roundtrip(args) => roundtrip(&codec, &mut block_ids, args),
    }
}

fn load_codec(path: &Path) -> Result<AnyCodec> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read codec config {}", path.display()))?;

    let config: CodecConfig = toml::from_str(&text)
        .wrap_err_with(|| format!("failed to parse codec config {}", path.display()))?;

    Ok(config.build()?)
}

fn demo_seed(time_varied: bool) -> u64 {
    if !time_varied {
        return FIXED_SEED;
    }

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(FIXED_SEED)
}

fn next_block_id(rng: &mut StdRng) -> i64 {
    rng.gen_range(0..MAX_DEMO_BLOCK_ID)
}

fn encode(codec: &AnyCodec, rng: &mut StdRng, args: EncodeArgs) -> Result<()> {
    let message = fs::read(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;

    let block_ids: Vec<i64> = (0..args.num_blocks).map(|_| next_block_id(rng)).collect();

    let blocks = fountain_codec::encode(codec, &message, &block_ids);

    let mut buf = BytesMut::new();
    for block in &blocks {
        block.serialize_into(&mut buf);
    }

    fs::write(&args.output, &buf)
        .wrap_err_with(|| format!("failed to write {}", args.output.display()))?;

    info!(
        message_len = message.len(),
        num_blocks = blocks.len(),
        bytes_written = buf.len(),
        "encoded"
    );

    Ok(())
}

fn decode(codec: &AnyCodec, args: DecodeArgs) -> Result<()> {
    let data = fs::read(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;

    let blocks = deserialize_stream(Bytes::from(data))?;

    let mut decoder = codec.new_decoder(args.message_len);
    decoder.add_blocks(&blocks);

    let stats = decoder.stats();

    let Some(message) = decoder.decode() else {
        bail!(
            "{} blocks do not determine the message: {:?}",
            blocks.len(),
            stats
        );
    };

    fs::write(&args.output, &message)
        .wrap_err_with(|| format!("failed to write {}", args.output.display()))?;

    info!(?stats, message_len = message.len(), "decoded");

    Ok(())
}

fn roundtrip(codec: &AnyCodec, rng: &mut StdRng, args: RoundtripArgs) -> Result<()> {
    let message = fs::read(&args.input)
        .wrap_err_with(|| format!("failed to read {}", args.input.display()))?;

    let encoder = Encoder::new(codec, &message);
    let mut decoder = codec.new_decoder(message.len());

    let mut num_blocks = 0;
    while !decoder.determined() {
        if num_blocks == args.max_blocks {
            bail!(
                "not determined after {} blocks: {:?}",
                num_blocks,
                decoder.stats()
            );
        }

        let block = encoder.encode_block(next_block_id(rng));
        decoder.add_blocks([&block]);

        num_blocks += 1;
    }

    let stats = decoder.stats();

    match decoder.decode() {
        Some(decoded) if decoded == message => {}
        Some(_) => bail!("decoded message differs from the input"),
        None => bail!("decoder determined but produced no message"),
    }

    info!(
        ?stats,
        num_blocks,
        overhead = num_blocks as f64 / codec.source_blocks().get() as f64,
        "roundtrip succeeded"
    );

    Ok(())
}
