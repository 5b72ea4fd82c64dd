pub mod run;
pub mod stage;

pub use run::*;
pub use stage::*;
