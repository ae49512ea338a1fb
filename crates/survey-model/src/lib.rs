pub mod categories;
pub mod college;
pub mod corrections;
pub mod dictionary;
pub mod enums;
pub mod error;
pub mod matches;
pub mod options;
pub mod record;

pub use categories::{CategoryEntry, OtherCategoryMap};
pub use college::College;
pub use corrections::{FinalNameCorrection, MatchCorrection};
pub use dictionary::{CORE_FIELDS, ColumnGroup, ColumnGroupMap, GroupColumn};
pub use enums::{CollegeType, InfoType};
pub use error::{ModelError, Result};
pub use matches::NameMatch;
pub use options::{OptionEntry, OptionSet};
pub use record::ApplicationRecord;
