//! Property tests for command-line assembly and process control

use proptest::prelude::*;
use provkit_core::host::{ProcCtrl, join_cmdv};

proptest! {
    /// Property: a joined command line splits back into the original argv
    /// when escaped spaces are respected
    #[test]
    fn join_cmdv_is_reversible(
        argv in proptest::collection::vec("[a-zA-Z0-9 ._/-]{1,20}", 1..6),
    ) {
        let cmdln = join_cmdv(&argv);
        // Split on unescaped spaces only.
        let mut recovered = Vec::new();
        let mut current = String::new();
        let mut chars = cmdln.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&' ') => {
                    chars.next();
                    current.push(' ');
                }
                ' ' => {
                    recovered.push(std::mem::take(&mut current));
                }
                other => current.push(other),
            }
        }
        recovered.push(current);
        prop_assert_eq!(recovered, argv);
    }

    /// Property: arguments without spaces pass through the join verbatim
    #[test]
    fn join_cmdv_space_free_args_verbatim(
        argv in proptest::collection::vec("[a-zA-Z0-9._/-]{1,20}", 1..6),
    ) {
        prop_assert_eq!(join_cmdv(&argv), argv.join(" "));
    }

    /// Property: ProcCtrl JSON round trip preserves both fields
    #[test]
    fn proc_ctrl_json_round_trip(wait in any::<bool>(), daemon_wait in proptest::option::of(0u64..600)) {
        let ctrl = ProcCtrl { wait_for_completion: wait, daemon_wait };
        let json = serde_json::to_string(&ctrl).expect("serialize");
        let back: ProcCtrl = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(back, ctrl);
    }
}
