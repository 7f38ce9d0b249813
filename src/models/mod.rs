pub mod layout;
pub mod record;
pub mod report;
pub mod sheet;
pub mod subject;

pub use layout::SheetLayout;
pub use record::{ErrorRecord, KnowledgeGroup, UNPARSEABLE_SORT_KEY};
pub use report::{StudentReport, SubjectOutcome, SubjectReport};
pub use sheet::{Cell, RawSheet};
pub use subject::Subject;
