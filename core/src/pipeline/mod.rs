//! External conversion pipeline: LJPEG → raw → PNM → 16-bit PNG

mod command;
mod convert;
mod stage;

pub use command::{CommandRunner, ProcessOutput, SystemRunner};
pub use convert::{raw_artifact_path, ConversionPipeline, RAW_SUFFIX};
pub use stage::Stage;
