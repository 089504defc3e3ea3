use std::time::Duration;

/// Credential that must be present before the menu is shown
pub(crate) const DEFAULT_REQUIRED_ENV: &str = "ANTHROPIC_API_KEY";

/// Lab root under the home directory: `~/test_labs`
pub(crate) const LAB_DIR: &str = "test_labs";

/// Session transcript file name prefix: "dojo_session_20260115_093000.log"
pub(crate) const SESSION_LOG_PREFIX: &str = "dojo_session_";

/// Second-resolution stamp used in transcript file names
pub(crate) const SESSION_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// ISO-8601 local timestamp written into `[START]`/`[END]` entries
pub(crate) const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Interpreter used for the built-in `.py` roster
pub(crate) const DEFAULT_INTERPRETER: &str = "python3";

/// Width of the horizontal rules printed around agent runs
pub(crate) const RULE_WIDTH: usize = 75;

/// How long an interrupted agent gets to exit before it is killed
pub(crate) const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// Poll interval while waiting on a running agent
pub(crate) const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(20);
