//! Output rendering for both targets plus the final assembly step.

pub mod assemble;
pub mod coord;
pub mod euroscope;
pub mod gng;

pub use assemble::{
    assemble_es, assemble_gng, color_definitions, fill_ese_template, fill_sct_template, EsBodies,
    GngBodies,
};
pub use coord::to_es_notation;
pub use euroscope::EsRecord;
pub use gng::GngRecord;
