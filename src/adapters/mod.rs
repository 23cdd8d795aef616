// Adapters layer: terminal implementations of the UI-facing ports.

pub mod console;

pub use console::{ConsoleNotifier, TerminalNavigator};
