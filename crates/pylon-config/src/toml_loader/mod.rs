//! TOML session file loading.

mod loader;


pub use loader::{load_from_path, parse_session, SessionFile};
