pub mod categories;
pub mod config;
mod csv_utils;
pub mod corrections;
pub mod dictionary;
pub mod doctor;
pub mod error;
pub mod names;
pub mod options;
pub mod registry;

pub use categories::{load_other_categories, orphaned_answer_categories};
pub use config::{CONFIG_FILE_NAME, DEFAULT_MIN_SCORE, RunConfig};
pub use corrections::{load_final_name_corrections, load_match_corrections};
pub use dictionary::load_column_group_map;
pub use doctor::{DoctorCounts, DoctorReport, check_reference_data};
pub use error::RefDataError;
pub use names::load_canonical_names;
pub use options::{load_option_sets, load_validated_option_sets, validate_option_sets};
pub use registry::{RefData, load_reference_data};
