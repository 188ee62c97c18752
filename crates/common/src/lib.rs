/**
 * Identity domain: users, roles, password hashing
 *  and the authentication service that sits on top
 *  of a pluggable user provider.
 */
pub mod identity;
/**
 * The academic content tree: departments own years,
 *  years own subjects, subjects own resources.
 * One department is one aggregate; every nested
 *  mutation rewrites the whole aggregate through a
 *  pluggable department provider.
 */
pub mod tree;

pub mod prelude {
    pub use crate::identity::{
        IdentityError, IdentityService, Role, SessionUser, User, UserProvider,
    };
    pub use crate::tree::{
        Department, DepartmentProvider, Resource, ResourceKind, Subject, TreeError, TreeLevel,
        TreeManager, Year,
    };
}
