// src/application/mod.rs
pub mod board;
pub mod note_creator;
pub mod note_lister;
pub mod repository;

pub use board::{BoardState, NoteBoard};
pub use note_creator::{NoteCreator, Submission};
pub use note_lister::NoteLister;
pub use repository::{MediaResolver, NoteRepository};
