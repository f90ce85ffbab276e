pub mod task;
pub mod user;

pub use task::InMemoryTaskRepository;
pub use user::InMemoryUserRepository;
