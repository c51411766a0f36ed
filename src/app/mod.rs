pub mod books;
pub mod error;
pub mod students;
pub mod users;

pub use books::BookService;
pub use error::{AppError, ConflictCause};
pub use students::StudentService;
pub use users::UserService;
