//! Feature slices for the TUI (state/update/render per screen).

pub mod collection;
pub mod home;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod wallet;
