//! One [`QuestionWidget`](crate::QuestionWidget) implementation per question kind.

mod choice;
pub use choice::{MultiChoice, Select, SingleChoice, Toggle};

mod text;
pub use text::{DateInput, Edit, LongText, ShortText};

mod scale;
pub use scale::{NumericScale, Slide};

mod file;
pub use file::{FileEvent, ImageFile, SignatureFile};
