pub mod dates;
pub mod navigator;
pub mod pagination;
pub mod search;
pub mod session;
