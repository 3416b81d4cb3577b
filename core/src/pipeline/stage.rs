use std::fmt;

/// The three external conversion stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum Stage {
    /// LJPEG to raw (`jpeg -d -s`)
    Decompress,
    /// Raw to PNM (`ddsmraw2pnm`)
    RawToPnm,
    /// PNM to 16-bit PNG (`convert -depth 16`)
    PnmToPng,
}

impl Stage {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Stage::Decompress => "decompression",
            Stage::RawToPnm => "raw-to-portable conversion",
            Stage::PnmToPng => "PNM/PNG conversion",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
