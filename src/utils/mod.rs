//! Utility modules shared by the loader, serializer and modifier.

pub mod html;
pub mod text;
