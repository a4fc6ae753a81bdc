mod user;

pub use user::{Role, User, USER_ID_HEADER, USER_ROLE_HEADER};
