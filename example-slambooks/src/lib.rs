pub mod class_of_2024;
pub mod farewell;
pub mod friendship;
pub mod responses;

// Re-export class_of_2024 items
pub use class_of_2024::{CLASS_OF_2024_JSON, class_of_2024};

// Re-export farewell items
pub use farewell::farewell;

// Re-export friendship items
pub use friendship::friendship;

// Re-export responses items
pub use responses::{FAREWELL_RESPONSES_JSON, FixtureFiles, farewell_responses};
