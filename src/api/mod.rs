//! Response envelopes and pagination shared by the handlers

pub mod pagination;
pub mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use response::{Created, Success};
