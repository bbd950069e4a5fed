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

use fountain_codec::{Codec, CodecConfig};
use rand::{thread_rng, Rng};
use test_case::test_case;

const BINARY: &str = r#"
    source_blocks = 37

    [codec]
    kind = "binary"
"#;

const LUBY: &str = r#"
    source_blocks = 37

    [codec]
    kind = "luby"
    degree_distribution = { family = "robust_soliton", m = 6, delta = 0.1 }
"#;

const ONLINE: &str = r#"
    source_blocks = 37

    [codec]
    kind = "online"
    epsilon = 0.05
    quality = 3
    seed = 8923489
"#;

#[test_case(BINARY; "binary")]
#[test_case(LUBY; "luby")]
#[test_case(ONLINE; "online")]
fn test_pick_indices_deterministic(config: &str) {
    let config: CodecConfig = toml::from_str(config).unwrap();

    // Two independently built codecs must agree, as encoder and decoder do.
    let encoder_side = config.build().unwrap();
    let decoder_side = config.build().unwrap();

    let num_blocks = encoder_side.intermediate_blocks();

    let mut rng = thread_rng();
    let block_ids = [0, 1, -1, i64::MIN, i64::MAX, i64::MIN + 1, i64::MAX - 1]
        .into_iter()
        .chain((0..1000).map(|_| rng.gen::<i64>()));

    for block_id in block_ids {
        let indices = encoder_side.pick_indices(block_id);

        assert_eq!(indices, encoder_side.pick_indices(block_id));
        assert_eq!(indices, decoder_side.pick_indices(block_id));

        assert!(indices.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|index| *index < num_blocks));
    }
}

#[test]
fn test_distinct_ids_give_distinct_selections() {
    let config: CodecConfig = toml::from_str(BINARY).unwrap();
    let codec = config.build().unwrap();

    // 37 coin flips per block make a collision among 400 ids vanishingly unlikely.
    let mut selections: Vec<_> = (-200..200).map(|id| codec.pick_indices(id)).collect();
    selections.sort_by(|a, b| a.as_slice().cmp(b.as_slice()));
    selections.dedup();

    assert_eq!(selections.len(), 400);
}
