// Copyright 2019 The Fuchsia Authors. All rights reserved.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use {
    crate::error::Error,
    anyhow::Context,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

/// Optional fields copied into BSS descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Features {
    pub fils: bool,
    pub qbss_load: bool,
}

impl Default for Features {
    fn default() -> Self {
        Features { fils: true, qbss_load: true }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Keep beacons whose advertised channel is within 10 MHz of the channel they were heard on.
    pub allow_adjacent_channel: bool,
    pub features: Features,
}

impl ScanConfig {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scan config {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("failed to parse scan config {}", path.display()))
    }
}
