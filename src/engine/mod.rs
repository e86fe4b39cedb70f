// ============================================================================
// Engine Module
// Multiplication engine, result cache, and derived operations
// ============================================================================

mod config;
mod mul_cache;
mod trit_engine;

pub mod factory;
pub mod karatsuba;

pub use config::EngineConfig;
pub use factory::TritEngineBuilder;
pub use karatsuba::KARATSUBA_CUTOFF;
pub use mul_cache::MUL_CACHE_CAPACITY;
pub use trit_engine::{TritEngine, MAX_FACTORIAL_ARG, MAX_POWER_EXPONENT};
