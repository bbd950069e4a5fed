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

use serde::{Deserialize, Serialize};

use crate::{
    codec::{AnyCodec, BinaryCodec, LubyCodec, OnlineCodec},
    degree::DegreeDistribution,
    error::ConfigError,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    pub source_blocks: usize,
    pub codec: CodecVariantConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum CodecVariantConfig {
    Binary,
    Luby {
        degree_distribution: DegreeDistributionConfig,
    },
    Online {
        epsilon: f64,
        quality: usize,
        seed: i64,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "family", rename_all = "snake_case", deny_unknown_fields)]
pub enum DegreeDistributionConfig {
    IdealSoliton,
    RobustSoliton { m: usize, delta: f64 },
    Online { epsilon: f64 },
    // Cumulative probabilities indexed by degree, entry 0 included.
    Explicit { cdf: Vec<f64> },
}

impl DegreeDistributionConfig {
    pub fn build(&self, source_blocks: usize) -> Result<DegreeDistribution, ConfigError> {
        match self {
            DegreeDistributionConfig::IdealSoliton => {
                DegreeDistribution::ideal_soliton(source_blocks)
            }
            DegreeDistributionConfig::RobustSoliton { m, delta } => {
                DegreeDistribution::robust_soliton(source_blocks, *m, *delta)
            }
            DegreeDistributionConfig::Online { epsilon } => DegreeDistribution::online(*epsilon),
            DegreeDistributionConfig::Explicit { cdf } => DegreeDistribution::from_cdf(cdf.clone()),
        }
    }
}

impl CodecConfig {
    pub fn build(&self) -> Result<AnyCodec, ConfigError> {
        let codec = match &self.codec {
            CodecVariantConfig::Binary => BinaryCodec::new(self.source_blocks)?.into(),
            CodecVariantConfig::Luby {
                degree_distribution,
            } => LubyCodec::new(
                self.source_blocks,
                degree_distribution.build(self.source_blocks)?,
            )?
            .into(),
            CodecVariantConfig::Online {
                epsilon,
                quality,
                seed,
            } => OnlineCodec::new(self.source_blocks, *epsilon, *quality, *seed)?.into(),
        };

        Ok(codec)
    }
}
