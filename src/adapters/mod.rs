// Adapters layer: concrete implementations of the domain ports for the
// outside world (Dropbox RPC, tokio timer, process re-exec).

pub mod clock;
pub mod dropbox;
pub mod process;
