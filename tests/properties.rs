//! Property tests for the dispatch surface.

mod common;

use common::TestEnv;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Any subcommand other than the two real verbs is a usage error and
    /// must leave the workspace untouched.
    #[test]
    fn junk_subcommands_never_mutate_the_workspace(
        cmd in "[a-zA-Z][a-zA-Z0-9_-]{0,12}"
    ) {
        prop_assume!(cmd != "build" && cmd != "run" && cmd != "help");

        let env = TestEnv::new();
        env.write_artifact(b"artifact");
        let before = env.tree();

        let result = env.run(&[cmd.as_str()]);

        prop_assert!(!result.success);
        prop_assert_eq!(env.tree(), before);
    }
}
