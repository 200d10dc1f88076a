//! # CLI Module
//!
//! The command-line layer of songlist. It wires the interactive
//! collaborators (prompts, spinners, tables) and the Spotify client around
//! the pure [`crate::catalog`] engine.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth 2.0 PKCE flow and caches the token
//! - [`compile`] - Compiles an artist's catalog into one ordered songlist
//!   and adds it to a playlist, or prints it with `--dry-run`
//!
//! ## Data Flow of `compile`
//!
//! 1. **Artist Resolution**: A Spotify link is used directly, a name is
//!    searched and confirmed or picked interactively
//! 2. **Release Listing**: Every release of the artist is listed
//! 3. **Selection**: Impure releases are kept, dropped or offered in a
//!    multi-select prompt, depending on [`ImpurePolicy`]
//! 4. **Track Fetching**: Track lists are fetched behind a spinner
//! 5. **Compilation**: Releases are merged and de-duplicated, optionally
//!    reversed
//! 6. **Delivery**: Tracks are added in batches of 100, or listed as a table
//!
//! ## Error Handling
//!
//! Every failure ends the run through the `error!` macro with a message
//! pointing at the fix (authenticate, be more specific, set a playlist).
//! A songlist is either delivered after a successful compilation or not at
//! all.
//!
//! ## Usage Patterns
//!
//! ```bash
//! songlist auth
//! songlist compile "Tove Lo" --dry-run
//! songlist compile https://open.spotify.com/artist/4NHQUGzhtTLFvgF5SZesLK -r
//! songlist compile "Tove Lo" --exclude-impure --playlist 37i9dQZF1DX...
//! ```

mod auth;
mod compile;
mod prompt;

pub use auth::auth;
pub use compile::CompileRequest;
pub use compile::ImpurePolicy;
pub use compile::compile;
pub use prompt::PromptPolicy;
pub use prompt::PromptSelector;
