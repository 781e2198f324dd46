//! Domain entities: courses, sections, split parts, and display colors.

pub mod color;
pub mod course;
pub mod ids;
pub mod section;
pub mod split;

pub use course::CourseDraft;
pub use ids::SectionId;
pub use section::{InstructorRef, Section, SectionStatus};
pub use split::{RoomCategoryRef, SplitPart, SplitSet};
