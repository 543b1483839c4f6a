pub mod recovery;
pub mod rename;
pub mod speculation;
