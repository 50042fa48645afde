mod color;
mod page;
mod user;

pub use color::{Color, NewColor};
pub use page::{Page, PageRequest, SortField};
pub use user::{NewUser, User};
