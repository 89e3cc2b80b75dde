pub use super::assignment::Entity as Assignment;
pub use super::course::Entity as Course;
pub use super::enrollment::Entity as Enrollment;
pub use super::grade::Entity as Grade;
pub use super::material::Entity as Material;
pub use super::notification::Entity as Notification;
pub use super::student::Entity as Student;
pub use super::submission::Entity as Submission;
pub use super::system_config::Entity as SystemConfig;
pub use super::teacher::Entity as Teacher;
pub use super::user::Entity as User;
