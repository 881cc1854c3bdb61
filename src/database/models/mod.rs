pub mod admin;
pub mod gallery;
pub mod notice;
pub mod result;
pub mod stats;
pub mod student;
pub mod teacher;

pub use admin::Admin;
pub use gallery::GalleryItem;
pub use notice::Notice;
pub use result::{CohortKey, MarkSheet, NewResult, RawSubjectMark, ResultRecord};
pub use stats::{ClassCount, DashboardStats, GenderCount};
pub use student::{NewStudent, Student, StudentChanges, StudentFilter};
pub use teacher::{NewTeacher, Teacher, TeacherChanges};
