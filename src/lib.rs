// src/lib.rs - Library interface for the HTR/TRC session reader

pub mod analysis_bridge;
pub mod axis_names;
pub mod config;
pub mod constants;
pub mod correction;
pub mod data_input;
pub mod error;
pub mod export;
pub mod marker_mapper;
pub mod model_registry;
pub mod session;
pub mod types;

pub use data_input::htr_data::{ColumnSelection, HtrColumn, HtrData, SegmentName, SegmentRecord, SegmentSeries};
pub use data_input::htr_parser::{parse_htr_file, parse_htr_str};
pub use data_input::trc_data::{MetadataColumn, TrcData, TrcHeader, TrcRow};
pub use data_input::trc_parser::{disambiguate_labels, parse_trc_file, parse_trc_str};
pub use error::{IngestError, Result};
pub use marker_mapper::{map_markers, marker_set, MarkerSample, MarkerSet};
pub use model_registry::{lookup_model, BiomechanicalModel, MarkerLabel, ModelId};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
