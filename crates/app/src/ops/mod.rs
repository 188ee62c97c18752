pub mod add_user;
pub mod delete_user;
pub mod init;
pub mod serve;
pub mod version;

pub use add_user::AddUser;
pub use delete_user::DeleteUser;
pub use init::Init;
pub use serve::Serve;
pub use version::Version;
