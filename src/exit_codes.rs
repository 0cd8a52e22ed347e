//! Stable exit codes for lfs-untrack CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid plan, config, or usage; nothing was executed against the repo.
pub const INVALID: i32 = 1;
/// A migration step failed; the repository may be partially staged.
pub const FAILED: i32 = 2;
