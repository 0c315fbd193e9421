pub mod data;
pub mod receipt;
pub mod ssr;
