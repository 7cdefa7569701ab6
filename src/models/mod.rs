pub mod authority;
pub mod engine;
pub mod game;
pub mod selection;

pub use authority::{RuleAuthority, ShakmatyAuthority};
pub use engine::{EngineLimits, SearchEngine, Suggestion, UciEngine};
pub use game::{GameEvent, GameModel, PromotionPrompt, Transition};
pub use selection::Direction;
