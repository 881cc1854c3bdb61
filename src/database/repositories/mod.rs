pub mod admin;
pub mod gallery;
pub mod notice;
pub mod result;
pub mod stats;
pub mod student;
pub mod teacher;
pub mod visitor;

pub use admin::AdminRepository;
pub use gallery::GalleryRepository;
pub use notice::NoticeRepository;
pub use result::ResultRepository;
pub use stats::StatsRepository;
pub use student::StudentRepository;
pub use teacher::TeacherRepository;
pub use visitor::VisitorRepository;

pub type Result<T> = std::result::Result<T, crate::database::DatabaseError>;
