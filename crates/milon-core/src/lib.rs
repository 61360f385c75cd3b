pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod format;
pub mod generator;
pub mod history;
pub mod language;
pub mod preprocess;
pub mod sampling;
pub mod schema;

pub use dispatch::{Ack, ChannelDispatcher};
pub use error::{CoreError, DispatchError, FailedAttempt, FormatError, StorageError};
pub use fallback::{FailureClass, FallbackChain, Generated, Pause, TokioPause};
pub use generator::{ContentGenerator, QuizGenerator};
pub use history::HistoryStore;
pub use language::{Labels, LanguageTutor};
