pub mod event;
pub mod shift;
pub mod stamp_type;
