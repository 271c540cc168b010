pub mod conversation;
pub mod enums;
pub mod exercise;
pub mod meal;
pub mod medication;

pub use conversation::ChatMessage;
pub use enums::{DoseStatus, InvalidEnum, MealKind, MessageSender};
pub use exercise::{DailyExercise, ExerciseRecord, ExerciseToday};
pub use meal::Meal;
pub use medication::Medication;
