pub mod add_user;
pub mod delete_user;
