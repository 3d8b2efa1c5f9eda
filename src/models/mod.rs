mod exercise;
mod password_reset_token;
mod practice_session;
mod refresh_token;
mod tags;
mod user;

pub use exercise::{Exercise, ExerciseInput};
pub use password_reset_token::PasswordResetToken;
pub use practice_session::{PracticeSession, SessionInput, SessionWithExercises};
pub use refresh_token::RefreshToken;
pub use tags::{Caliber, PracticeType, TagInfo, TargetType, UnknownTag};
pub use user::User;
