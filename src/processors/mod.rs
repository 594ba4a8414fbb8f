pub mod coordinate_decoder;
pub mod file_pipeline;
pub mod folder_pipeline;
pub mod formatter;
pub mod timestamp;
pub mod unit_converter;

pub use coordinate_decoder::{CoordinateDecoder, DecodeReport};
pub use file_pipeline::{FileOutcome, FilePipeline, OutputMode, PipelineOptions, SkipReason};
pub use folder_pipeline::{FolderPipeline, FolderSummary};
pub use formatter::RecordFormatter;
pub use timestamp::TimestampReconstructor;
pub use unit_converter::UnitConverter;
