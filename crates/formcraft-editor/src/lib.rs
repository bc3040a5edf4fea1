pub mod history;
pub mod session;

pub use history::History;
pub use session::EditorSession;
