pub mod niqqud;
pub mod tutor;

pub use niqqud::strip_niqqud;
pub use tutor::HebrewTutor;
