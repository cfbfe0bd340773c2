pub mod index;
pub mod live;
